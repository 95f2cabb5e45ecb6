//! Whelk: a small command shell with a natural-language fallback.
//!
//! Whelk accepts one line of text at a time. Recognized first tokens
//! (`ls`, `cd`, `pwd`, `mkdir`, `rm`, `cpu`, `mem`, `exit`) dispatch to
//! filesystem and process-info operations; anything else is offered to an
//! optional remote suggestion service and then run through a small keyword
//! matcher ("create folder X", "remove X", "move X into Y").
//!
//! A [`Shell`] owns the session state (working directory, history) and
//! exposes a single text-in/text-out entry point, [`Shell::execute`]:
//! every outcome, including every error, is rendered into the returned
//! output text, so callers never have to handle failures themselves.

mod command;
mod error;
mod history;
mod nl;
pub mod ops;
mod shell;
mod suggest;

pub use command::{Command, ParseError};
pub use error::ShellError;
pub use history::History;
pub use nl::{Intent, parse_intent};
pub use shell::{Shell, ShellBuilder, Turn};
pub use suggest::{CommandSuggester, FixedSuggester, HttpSuggester};
