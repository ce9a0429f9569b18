//! Editor commands - one per input line.

use thiserror::Error;

use draftpad_core::DomainError;
use draftpad_core::domain::PostFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(PostFilter),
    New,
    Open(String),
    Title(String),
    Body(String),
    Append(String),
    Tag(String),
    Untag(String),
    Save,
    Publish,
    Delete(String),
    Show,
    Close,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

pub const HELP: &str = "\
commands:
  list [all|drafts|published]   list posts
  new                           start a new post
  open <id>                     edit an existing post
  title <text>                  set the title
  body <text>                   replace the body
  append <text>                 append a line to the body
  tag <name> / untag <name>     add or remove a tag
  save                          save now
  publish                       publish the post
  delete <id>                   delete a post
  show                          print the post being edited
  close                         finish editing
  quit                          exit";

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let arg = |name: &'static str| -> Result<String, CommandError> {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List(rest.parse()?),
            "new" => Command::New,
            "open" => Command::Open(arg("open")?),
            "title" => Command::Title(rest.to_string()),
            "body" => Command::Body(rest.to_string()),
            "append" => Command::Append(rest.to_string()),
            "tag" => Command::Tag(arg("tag")?),
            "untag" => Command::Untag(arg("untag")?),
            "save" => Command::Save,
            "publish" => Command::Publish,
            "delete" | "rm" => Command::Delete(arg("delete")?),
            "show" => Command::Show,
            "close" => Command::Close,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_arguments() {
        assert_eq!(
            Command::parse("title  Hello world ").unwrap(),
            Some(Command::Title("Hello world".into()))
        );
        assert_eq!(
            Command::parse("list drafts").unwrap(),
            Some(Command::List(PostFilter::Drafts))
        );
        assert_eq!(Command::parse("list").unwrap(), Some(Command::List(PostFilter::All)));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("open"),
            Err(CommandError::MissingArgument("open"))
        ));
        assert!(matches!(Command::parse("frobnicate"), Err(CommandError::Unknown(_))));
        assert!(matches!(Command::parse("list later"), Err(CommandError::Invalid(_))));
    }

    #[test]
    fn test_title_may_be_cleared() {
        assert_eq!(Command::parse("title").unwrap(), Some(Command::Title(String::new())));
    }
}
