//! Command-line parsing: one line of text in, a recognized command out.
//!
//! Tokens are split on whitespace; there is no quoting or escaping, so
//! embedded spaces in paths are not supported. Matching on the first token
//! is exact and case-sensitive; unrecognized input is handed to the
//! natural-language fallback by the shell.

/// A recognized shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ls` - list the entries of the working directory.
    List,
    /// `cd <dir>` - change the working directory.
    ChangeDir(String),
    /// `pwd` - print the working directory.
    PrintWorkingDir,
    /// `mkdir <dir>` - create a directory.
    MakeDir(String),
    /// `rm <path>` - remove a file or a directory tree.
    Remove(String),
    /// `cpu` - show CPU utilization.
    Cpu,
    /// `mem` - show memory utilization.
    Mem,
    /// `exit` - end the session.
    Exit,
}

/// Why a line did not parse into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A recognized token was missing its required argument; the payload
    /// is the usage line to display.
    Usage(&'static str),
    /// The first token is not a recognized command.
    Unrecognized,
}

impl Command {
    /// Parse one input line.
    ///
    /// Arguments beyond those a command requires are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Err(ParseError::Unrecognized);
        };
        match first {
            "ls" => Ok(Self::List),
            "cd" => match tokens.next() {
                Some(dir) => Ok(Self::ChangeDir(dir.to_string())),
                None => Err(ParseError::Usage("Usage: cd <directory>")),
            },
            "pwd" => Ok(Self::PrintWorkingDir),
            "mkdir" => match tokens.next() {
                Some(dir) => Ok(Self::MakeDir(dir.to_string())),
                None => Err(ParseError::Usage("Usage: mkdir <directory>")),
            },
            "rm" => match tokens.next() {
                Some(path) => Ok(Self::Remove(path.to_string())),
                None => Err(ParseError::Usage("Usage: rm <file/dir>")),
            },
            "cpu" => Ok(Self::Cpu),
            "mem" => Ok(Self::Mem),
            "exit" => Ok(Self::Exit),
            _ => Err(ParseError::Unrecognized),
        }
    }
}
