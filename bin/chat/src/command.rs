//! Input line parsing.

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Send the text to the assistant.
    Submit(&'a str),
    /// Stop waiting for the current reply.
    Cancel,
    /// Print the transcript as JSON.
    Export,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    /// Parses one input line. Anything that is not a known slash command is
    /// a submission, including blank lines.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/cancel" => Self::Cancel,
            "/export" => Self::Export,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Submit(line),
        }
    }
}

pub const HELP: &str = "Commands: /cancel stops waiting for a reply, /export prints the \
    transcript as JSON, /quit leaves.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands() {
        assert_eq!(Command::parse("/cancel"), Command::Cancel);
        assert_eq!(Command::parse(" /export "), Command::Export);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/help"), Command::Help);
    }

    #[test]
    fn everything_else_is_submitted_verbatim() {
        assert_eq!(
            Command::parse("How much can I save?"),
            Command::Submit("How much can I save?")
        );
        assert_eq!(Command::parse("   "), Command::Submit("   "));
        assert_eq!(Command::parse("/budget"), Command::Submit("/budget"));
    }
}
