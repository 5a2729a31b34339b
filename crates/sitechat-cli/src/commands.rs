/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Print the full transcript.
    ShowHistory,
    /// Ask for name and email, then send the CV.
    RequestCv,
    /// Show status (persona, model, session, turns).
    ShowStatus,
    /// Not a command - treat as a question for the assistant.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    let cmd = input.split_whitespace().next().unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/history" => CommandResult::ShowHistory,
        "/cv" | "/contact" => CommandResult::RequestCv,
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("SiteChat v{}", env!("CARGO_PKG_VERSION"))),
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
SiteChat commands

  /history          Show the conversation so far
  /cv, /contact     Leave your name and email to receive the CV
  /status           Show session details
  /version          Show version information
  /help, /h         Show this help message
  /exit, /quit, /q  Quit

Anything else is sent to the assistant as a question.";

    CommandResult::Message(help_text.into())
}
