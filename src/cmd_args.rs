use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to read from the profile file. Default is 'default'.
    /// A missing profile falls back to built-in settings.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Log debug messages to stderr.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    /// Execution server base URL, overriding the profile
    #[clap(long, help = "execution server URL")]
    server: Option<String>,

    /// Print the highlighted markup of a source file and exit
    #[clap(long, value_name = "FILE", conflicts_with = "run")]
    render: Option<PathBuf>,

    /// Execute a whole program file and exit
    #[clap(long, value_name = "FILE")]
    run: Option<PathBuf>,

    /// Shot count for --run, overriding the profile
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    shots: Option<u32>,
}

/// What the process should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Console,
    Render(PathBuf),
    Run(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    server: Option<String>,
    mode: Mode,
    shots: Option<u32>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        let mode = match (args.render, args.run) {
            (Some(path), _) => Mode::Render(path),
            (None, Some(path)) => Mode::Run(path),
            (None, None) => Mode::Console,
        };
        Self {
            profile: args.profile,
            verbose: args.verbose,
            server: args.server,
            mode,
            shots: args.shots,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn shots(&self) -> Option<u32> {
        self.shots
    }
}
