//! Interactive Session
//!
//! Owns the [`TodoView`] and drives it from line-based user input.
//!
//! Every backend request runs on its own tokio task. Finished tasks report
//! their [`Event`] over an mpsc channel and the session applies events in
//! arrival order. Requests are never sequenced against each other, so when two
//! overlap the later response wins.

use std::io;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::api::TodoApi;
use crate::view::{render, Command, Event, TodoView};

/// Help text listing the input commands
pub const HELP: &str = "\
Commands:
  add <title>      Create a todo
  title <text>     Set the new-todo input without submitting
  submit           Create a todo from the current input
  load             Load todos from the backend
  sample           Load sample todos (health check)
  toggle <row|id>  Flip a todo's done flag
  delete <row|id>  Delete a todo
  show             Print the page again
  help             Show this help
  quit             Leave
";

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Title(String),
    Submit,
    Load,
    Sample,
    Toggle(String),
    Delete(String),
    Show,
    Help,
    Quit,
}

/// Errors from parsing a line of input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let required = |usage: &'static str| {
            if rest.is_empty() {
                Err(ParseActionError::MissingArgument(usage))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "" => Err(ParseActionError::Empty),
            // Blank titles are accepted here, the view refuses to submit them.
            "add" => Ok(Action::Add(rest.to_string())),
            "title" => Ok(Action::Title(rest.to_string())),
            "submit" => Ok(Action::Submit),
            "load" => Ok(Action::Load),
            "sample" => Ok(Action::Sample),
            "toggle" => required("toggle <row|id>").map(Action::Toggle),
            "delete" | "rm" => required("delete <row|id>").map(Action::Delete),
            "show" | "ls" => Ok(Action::Show),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" => Ok(Action::Quit),
            other => Err(ParseActionError::Unknown(other.to_string())),
        }
    }
}

/// What the caller should print after handling an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Render,
    Help,
    Hint(String),
    Quit,
}

/// Single owner of the view plus the plumbing for in-flight requests
pub struct Session {
    view: TodoView,
    api: Arc<dyn TodoApi>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl Session {
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self::with_view(api, TodoView::new())
    }

    pub fn with_view(api: Arc<dyn TodoApi>, view: TodoView) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            view,
            api,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn view(&self) -> &TodoView {
        &self.view
    }

    /// Number of requests that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn render(&self) -> String {
        render(&self.view, self.api.base_url())
    }

    /// React to one user action, spawning a request if it needs one
    pub fn handle(&mut self, action: Action) -> Reply {
        match action {
            Action::Add(title) => {
                self.view.set_draft(title);
                self.submit()
            }
            Action::Title(title) => {
                self.view.set_draft(title);
                Reply::Render
            }
            Action::Submit => self.submit(),
            Action::Load => {
                self.spawn(Command::LoadAll);
                Reply::Render
            }
            Action::Sample => {
                self.spawn(Command::LoadSample);
                Reply::Render
            }
            Action::Toggle(reference) => {
                let command = self
                    .view
                    .resolve(&reference)
                    .and_then(|id| self.view.toggle(&id));
                match command {
                    Some(command) => {
                        self.spawn(command);
                        Reply::Render
                    }
                    None => no_match(&reference),
                }
            }
            Action::Delete(reference) => match self.view.resolve(&reference) {
                Some(id) => {
                    self.spawn(Command::Delete(id));
                    Reply::Render
                }
                None => no_match(&reference),
            },
            Action::Show => Reply::Render,
            Action::Help => Reply::Help,
            Action::Quit => Reply::Quit,
        }
    }

    fn submit(&mut self) -> Reply {
        match self.view.submit() {
            Some(command) => {
                self.spawn(command);
                Reply::Render
            }
            None => Reply::Hint("Enter a title first".to_string()),
        }
    }

    /// Start a command on its own task
    pub fn spawn(&mut self, command: Command) {
        tracing::debug!(operation = command.operation().name(), "Dispatching");
        self.view.start(&command);
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = command.execute(api.as_ref()).await;
            // The receiver lives in the session, a send error only means it is gone.
            let _ = events_tx.send(event);
        });
    }

    /// Wait for the next finished request, `None` when nothing is in flight
    pub async fn next_event(&mut self) -> Option<Event> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.events_rx.recv().await?;
        self.in_flight -= 1;
        Some(event)
    }

    pub fn apply(&mut self, event: Event) {
        self.view.apply(event);
    }

    /// Apply events until no request is in flight
    pub async fn settle(&mut self) {
        while let Some(event) = self.next_event().await {
            self.apply(event);
        }
    }

    /// Run the page: read actions from `input`, write pages to `output`
    ///
    /// Returns on `quit`, or once input is exhausted and every in-flight
    /// request has reported back.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        write(&mut output, &self.render()).await?;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };
                    match line.parse::<Action>() {
                        Ok(action) => match self.handle(action) {
                            Reply::Render => write(&mut output, &self.render()).await?,
                            Reply::Help => write(&mut output, HELP).await?,
                            Reply::Hint(hint) => write(&mut output, &format!("{}\n", hint)).await?,
                            Reply::Quit => break,
                        },
                        Err(ParseActionError::Empty) => {}
                        Err(e) => write(&mut output, &format!("{}\n", e)).await?,
                    }
                }
                Some(event) = self.next_event(), if self.in_flight > 0 => {
                    self.apply(event);
                    write(&mut output, &self.render()).await?;
                }
                else => break,
            }
        }

        Ok(())
    }
}

fn no_match(reference: &str) -> Reply {
    Reply::Hint(format!("No todo matches '{}'", reference))
}

async fn write<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
