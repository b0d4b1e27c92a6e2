//! # Console Application Controller
//!
//! The controller owns the session, the execution service and the view, and
//! runs the event loop: submitted lines and execution completions are the only
//! two triggers of state change. After each trigger, console events queued by
//! the session are forwarded to the renderer.

use std::io::{Stdout, Write};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::ConsoleProfile;
use crate::repl::events::PendingEvents;
use crate::repl::services::{ExecutionMessage, ExecutionService, Executor, HttpExecutor};
use crate::repl::session::ConsoleSession;
use crate::repl::views::{TerminalRenderer, ViewRenderer};

/// The main application controller
pub struct AppController<E: Executor, R, W: Write> {
    session: ConsoleSession,
    execution: ExecutionService<E>,
    view_renderer: TerminalRenderer<W>,
    pending_events: PendingEvents,
    input: Lines<R>,
    should_quit: bool,
}

impl AppController<HttpExecutor, BufReader<Stdin>, Stdout> {
    /// Create a controller on stdin/stdout talking to the profile's server
    pub fn new(profile: &ConsoleProfile) -> Result<Self> {
        let executor = HttpExecutor::new(profile).context("failed to create execution client")?;
        let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
        tracing::debug!("Starting console (interactive: {})", interactive);

        Self::with_io_streams(
            executor,
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            interactive,
        )
    }
}

impl<E, R, W> AppController<E, R, W>
where
    E: Executor,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Create new application controller with injected I/O streams (dependency injection)
    pub fn with_io_streams(executor: E, input: R, output: W, interactive: bool) -> Result<Self> {
        let pending_events = PendingEvents::new();
        let mut session = ConsoleSession::new().context("failed to compile console grammars")?;
        session.subscribe(pending_events.recorder());

        Ok(Self {
            session,
            execution: ExecutionService::new(executor),
            view_renderer: TerminalRenderer::new(output, interactive)?,
            pending_events,
            input: input.lines(),
            should_quit: false,
        })
    }

    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<W> {
        &self.view_renderer
    }

    pub fn into_view_renderer(self) -> TerminalRenderer<W> {
        self.view_renderer
    }

    /// Run the main console loop until input ends or Ctrl+C
    ///
    /// When input ends, reads still outstanding are awaited so that every
    /// submitted line gets its answer.
    pub async fn run(&mut self) -> Result<()> {
        for entry in self.session.log().entries() {
            self.view_renderer.render_entry(entry)?;
        }
        self.view_renderer.scroll_to_bottom()?;
        self.view_renderer.render_prompt(self.session.is_busy())?;

        let mut input_closed = false;
        while !self.should_quit {
            tokio::select! {
                line = self.input.next_line(), if !input_closed => {
                    match line.context("failed to read console input")? {
                        Some(line) => self.handle_line(&line)?,
                        None => {
                            tracing::debug!("Console input closed");
                            input_closed = true;
                        }
                    }
                }
                message = self.execution.next_response(), if self.session.is_busy() => {
                    match message {
                        Some(message) => self.handle_completion(message)?,
                        None => self.should_quit = true,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    self.should_quit = true;
                }
            }

            if input_closed && !self.session.is_busy() {
                self.should_quit = true;
            }
        }

        Ok(())
    }

    /// Submit one line to the session and dispatch any resulting read
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end_matches('\r');
        tracing::debug!("Received console line: {:?}", line);

        if let Some(ticket) = self.session.submit(line) {
            self.execution.dispatch(ticket);
        }
        self.process_console_events()
    }

    /// Feed a completion back to the session and dispatch the next queued read
    pub fn handle_completion(&mut self, message: ExecutionMessage) -> Result<()> {
        if let Some(next) = self.session.complete(message.id, message.outcome) {
            self.execution.dispatch(next);
        }
        self.process_console_events()
    }

    fn process_console_events(&mut self) -> Result<()> {
        for event in self.pending_events.drain() {
            self.view_renderer
                .handle_console_event(&event, self.session.log())?;
        }
        self.view_renderer.render_prompt(self.session.is_busy())
    }
}
