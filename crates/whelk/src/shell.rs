//! The execute boundary: one line of text in, one block of text out.
//!
//! [`Shell::execute`] is infallible by design. Operations return
//! structured results, and this module renders every one of them,
//! successes and failures alike, into the output text of the returned
//! [`Turn`], so callers (terminal loop, MCP server) only relay text.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::command::{Command, ParseError};
use crate::error::ShellError;
use crate::history::History;
use crate::nl::{self, Intent};
use crate::ops;
use crate::suggest::CommandSuggester;

/// The outcome of one submitted line.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    /// Captured output, one line per message. Empty when the command
    /// succeeded silently (`cd`, `mkdir`, `rm`).
    pub output: String,
    /// Whether the `exit` command was issued. The shell itself keeps
    /// working; the caller decides whether to stop its loop.
    pub exit: bool,
}

/// Accumulates output lines for one turn.
#[derive(Default)]
struct Output {
    buf: String,
}

impl Output {
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn error(&mut self, err: &ShellError) {
        self.line(&format!("Error: {err}"));
    }

    fn into_string(self) -> String {
        self.buf
    }
}

/// Builder for [`Shell`].
pub struct ShellBuilder {
    start_dir: Option<PathBuf>,
    suggester: Option<Arc<dyn CommandSuggester>>,
}

impl fmt::Debug for ShellBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellBuilder")
            .field("start_dir", &self.start_dir)
            .field("has_suggester", &self.suggester.is_some())
            .finish()
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellBuilder {
    /// Create a builder with default settings: the process working
    /// directory and no suggestion service.
    pub fn new() -> Self {
        Self {
            start_dir: None,
            suggester: None,
        }
    }

    /// Start the session in `dir` instead of the process working
    /// directory.
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Use `suggester` for unrecognized input. Without one, the local
    /// keyword matcher runs directly on the raw input.
    pub fn suggester(mut self, suggester: impl CommandSuggester + 'static) -> Self {
        self.suggester = Some(Arc::new(suggester));
        self
    }

    /// Use an already-shared suggester.
    pub fn suggester_arc(mut self, suggester: Arc<dyn CommandSuggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    /// Build the shell.
    ///
    /// # Errors
    ///
    /// Fails when the starting directory does not exist or is not a
    /// directory.
    pub fn build(self) -> Result<Shell, ShellError> {
        let start = match self.start_dir {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(ShellError::Io)?,
        };
        let display = start.display().to_string();
        let cwd = fs::canonicalize(&start).map_err(|e| ShellError::from_io(e, &display))?;
        if !cwd.is_dir() {
            return Err(ShellError::InvalidArgument(format!(
                "not a directory: {display}"
            )));
        }
        if self.suggester.is_none() {
            tracing::debug!("no suggester configured; fallback uses the local matcher only");
        }
        Ok(Shell {
            cwd,
            history: History::new(),
            suggester: self.suggester,
        })
    }
}

/// A command shell session.
///
/// Owns the working directory and the session history. The working
/// directory only changes on a successful `cd` and always refers to a
/// directory that existed at that moment.
pub struct Shell {
    cwd: PathBuf,
    history: History,
    suggester: Option<Arc<dyn CommandSuggester>>,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("cwd", &self.cwd)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl Shell {
    /// Create a new shell builder with default settings.
    pub fn builder() -> ShellBuilder {
        ShellBuilder::new()
    }

    /// The current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The session history, oldest entry first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Execute one line of input.
    ///
    /// Empty or whitespace-only input yields an empty turn and is not
    /// recorded in history. Everything else is recorded, then dispatched;
    /// errors are rendered into the turn's output rather than returned.
    pub async fn execute(&mut self, line: &str) -> Turn {
        let input = line.trim();
        if input.is_empty() {
            return Turn::default();
        }
        self.history.record(input);

        let mut out = Output::default();
        let mut exit = false;
        match Command::parse(input) {
            Ok(command) => {
                tracing::debug!(command = ?command, "dispatching");
                exit = self.run_command(&command, &mut out);
            }
            Err(ParseError::Usage(usage)) => out.line(usage),
            Err(ParseError::Unrecognized) => self.fallback(input, &mut out).await,
        }

        Turn {
            output: out.into_string(),
            exit,
        }
    }

    /// Run a recognized command; returns whether `exit` was issued.
    fn run_command(&mut self, command: &Command, out: &mut Output) -> bool {
        match command {
            Command::List => match ops::list_entries(&self.cwd) {
                Ok(names) => {
                    for name in names {
                        out.line(&name);
                    }
                }
                Err(e) => out.error(&e),
            },
            Command::ChangeDir(path) => match ops::change_dir(&self.cwd, path) {
                Ok(new_cwd) => self.cwd = new_cwd,
                Err(ShellError::NotFound(_)) => out.line("Directory not found."),
                Err(e) => out.error(&e),
            },
            Command::PrintWorkingDir => out.line(&self.cwd.display().to_string()),
            Command::MakeDir(name) => {
                if let Err(e) = ops::make_dir(&self.cwd, name) {
                    out.error(&e);
                }
            }
            Command::Remove(path) => {
                if let Err(e) = ops::remove(&self.cwd, path) {
                    out.error(&e);
                }
            }
            Command::Cpu => out.line(&format!("CPU Usage: {:.1}%", ops::cpu_usage())),
            Command::Mem => {
                let (percent, used_mb) = ops::memory_usage();
                out.line(&format!(
                    "Memory Usage: {percent:.1}% ({used_mb:.2} MB used)"
                ));
            }
            Command::Exit => {
                out.line("Exiting terminal...");
                return true;
            }
        }
        false
    }

    /// Natural-language fallback for unrecognized first tokens.
    ///
    /// The suggestion service is consulted first when configured; its
    /// suggestion (or, on failure, the raw input) then goes through the
    /// local keyword matcher.
    async fn fallback(&mut self, input: &str, out: &mut Output) {
        let suggestion = match &self.suggester {
            Some(suggester) => match suggester.suggest(input).await {
                Ok(text) => {
                    out.line(&format!("AI suggests: {text}"));
                    Some(text)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "suggestion service failed; matching raw input");
                    out.line(&format!("AI Error: {e}"));
                    None
                }
            },
            None => None,
        };
        let target = suggestion.as_deref().unwrap_or(input);

        match nl::parse_intent(target) {
            Some(Intent::CreateFolder(name)) => {
                if let Err(e) = ops::make_dir(&self.cwd, &name) {
                    out.error(&e);
                }
            }
            Some(Intent::Remove(path)) => {
                if let Err(e) = ops::remove(&self.cwd, &path) {
                    out.error(&e);
                }
            }
            Some(Intent::MoveInto { source, dest }) => {
                match ops::move_into(&self.cwd, &source, &dest) {
                    Ok(_) => out.line(&format!("Moved {source} into {dest}")),
                    Err(ShellError::NotFound(_)) => {
                        out.line("Source or destination does not exist.");
                    }
                    Err(e) => out.error(&e),
                }
            }
            None => out.line(&format!(
                "Command not recognized: {}",
                target.trim().to_lowercase()
            )),
        }
    }
}
