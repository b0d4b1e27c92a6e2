//! ANSI escape codes used by the console view
//!
//! Raw sequences plus the semantic aliases that map log kinds and token
//! classes to colors.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const FG_RED: &str = "\x1b[31m";
pub const FG_GREEN: &str = "\x1b[32m";
pub const FG_YELLOW: &str = "\x1b[33m";
pub const FG_BLUE: &str = "\x1b[34m";
pub const FG_MAGENTA: &str = "\x1b[35m";
pub const FG_CYAN: &str = "\x1b[36m";
pub const FG_BRIGHT_BLACK: &str = "\x1b[90m"; // Also known as dark gray

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";

// ============================================================================
// SEMANTIC COLOR ALIASES
// ============================================================================

// Log entry kinds
pub const FG_INFO: &str = FG_CYAN;
pub const FG_OUTPUT: &str = FG_GREEN;
pub const FG_ERROR: &str = FG_RED;
pub const FG_TIMESTAMP: &str = DIM;

// Token classes
pub const FG_KEYWORD: &str = FG_BLUE;
pub const FG_FUNCTION: &str = FG_MAGENTA;
pub const FG_NUMBER: &str = FG_YELLOW;
pub const FG_ADDRESS: &str = FG_CYAN;
pub const FG_COMMENT: &str = FG_BRIGHT_BLACK;
