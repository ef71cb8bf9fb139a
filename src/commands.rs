//! Slash-command parsing
//!
//! Turns the text after a leading `/` into a command for the agent.

/// A recognized operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the session
    Quit,
    /// Move the operator to a new location
    Relocate(String),
    /// List the voices the speech engine offers
    Avatars,
    /// Anything else, kept verbatim for the error message
    Unknown(String),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        if text == "quit" {
            return Self::Quit;
        }
        if let Some(rest) = text.strip_prefix("relocate") {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Self::Relocate(rest.trim().to_string());
            }
        }
        if text.starts_with("avatars") {
            return Self::Avatars;
        }
        Self::Unknown(text.to_string())
    }
}

/// What the front end should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_is_exact() {
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(
            Command::parse("quit now"),
            Command::Unknown("quit now".to_string())
        );
    }

    #[test]
    fn test_parse_relocate() {
        assert_eq!(
            Command::parse("relocate  pod bay "),
            Command::Relocate("pod bay".to_string())
        );
        assert_eq!(Command::parse("relocate"), Command::Relocate(String::new()));
        assert_eq!(
            Command::parse("relocate\tbridge"),
            Command::Relocate("bridge".to_string())
        );
    }

    #[test]
    fn test_relocate_needs_a_word_boundary() {
        assert_eq!(
            Command::parse("relocation report"),
            Command::Unknown("relocation report".to_string())
        );
        assert_eq!(
            Command::parse("relocated"),
            Command::Unknown("relocated".to_string())
        );
    }

    #[test]
    fn test_parse_avatars_and_unknown() {
        assert_eq!(Command::parse("avatars"), Command::Avatars);
        assert_eq!(Command::parse("avatars please"), Command::Avatars);
        assert_eq!(
            Command::parse("open the pod bay doors"),
            Command::Unknown("open the pod bay doors".to_string())
        );
    }
}
