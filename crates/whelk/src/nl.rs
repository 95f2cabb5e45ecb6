//! Local keyword matcher for natural-language phrases.
//!
//! Three phrase patterns, each its own small parser, tried in priority
//! order; the first match wins. Matching is case-insensitive over the
//! whole input (the input is lowercased first, so extracted names come
//! out lowercased too). Extraction is position-based: the token after the
//! key phrase is taken verbatim, so "remove the file called x" extracts
//! "the". That fragility is pinned by tests rather than fixed silently.

/// An action recovered from a natural-language phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// "create folder <name>" - make a directory.
    CreateFolder(String),
    /// "remove <target>" - delete a file or directory.
    Remove(String),
    /// "move <source> into <dest>" - relocate `source` under `dest`.
    MoveInto {
        /// Path to relocate.
        source: String,
        /// Directory that receives it.
        dest: String,
    },
}

/// Match `text` against the phrase patterns in priority order.
///
/// Returns `None` when no pattern applies; the shell reports that as
/// "Command not recognized".
pub fn parse_intent(text: &str) -> Option<Intent> {
    let text = text.to_lowercase();
    let text = text.trim();
    parse_create_folder(text)
        .or_else(|| parse_remove(text))
        .or_else(|| parse_move_into(text))
}

/// "create folder <name>": the first token after the phrase is the name.
fn parse_create_folder(text: &str) -> Option<Intent> {
    let (_, rest) = text.rsplit_once("create folder")?;
    let name = rest.split_whitespace().next()?;
    Some(Intent::CreateFolder(name.to_string()))
}

/// "remove <target>": the first token after the word is the target.
fn parse_remove(text: &str) -> Option<Intent> {
    let (_, rest) = text.rsplit_once("remove")?;
    let target = rest.split_whitespace().next()?;
    Some(Intent::Remove(target.to_string()))
}

/// "move <source> into <dest>": of the tokens after "move", the first is
/// the source and the third the destination. The word "into" must appear
/// somewhere in the phrase but its position is not checked, matching the
/// original heuristics.
fn parse_move_into(text: &str) -> Option<Intent> {
    if !text.contains("into") {
        return None;
    }
    let (_, rest) = text.rsplit_once("move")?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    Some(Intent::MoveInto {
        source: parts[0].to_string(),
        dest: parts[2].to_string(),
    })
}
