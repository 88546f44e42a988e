use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch to the booking wizard
    Book,
    /// Switch to the status tracker, optionally with a lookup key
    Track(Option<String>),
    /// Open the staff login modal
    Login,
    /// Drop the staff session and leave the dashboard
    Logout,
    /// Advance the wizard to the next step
    Next,
    /// Go back one wizard step
    Back,
    /// Run a tracker lookup with the current key
    Lookup,
    /// Reload the dashboard booking list
    Refresh,
    Help,
    Quit,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().map(|s| s.trim().to_string());

    match cmd {
        "book" | "b" => Ok(Command::Book),
        "track" | "t" => Ok(Command::Track(arg)),
        "login" | "l" => Ok(Command::Login),
        "logout" => Ok(Command::Logout),
        "next" | "n" => Ok(Command::Next),
        "back" => Ok(Command::Back),
        "lookup" => Ok(Command::Lookup),
        "refresh" | "r" => Ok(Command::Refresh),
        "help" | "h" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "" => Err(CommandError::Unknown("empty command".to_string())),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_takes_an_optional_key() {
        assert_eq!(
            parse_command("track 0812345678").unwrap(),
            Command::Track(Some("0812345678".to_string()))
        );
        assert_eq!(parse_command("t").unwrap(), Command::Track(None));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(matches!(
            parse_command("reboot"),
            Err(CommandError::Unknown(_))
        ));
    }
}
