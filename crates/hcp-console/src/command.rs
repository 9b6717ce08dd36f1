use hcp_core::models::record::RecordPatch;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/set <field> <value>`: overwrite one form field.
    Set(RecordPatch),
    /// `/save`: ask the agent to log the current form.
    Save,
    /// `/show`: print the form and the whole transcript.
    Show,
    Help,
    Quit,
    /// Anything that is not a command is sent to the agent verbatim.
    Chat(String),
    /// A slash command that could not be parsed.
    Invalid(String),
}

pub const HELP: &str = "\
commands:
  /set <field> <value>   set a form field (hcp_name, interaction_type, summary, sentiment, next_step)
  /save                  log the current form with the agent
  /show                  print the form and transcript
  /help                  show this message
  /quit                  exit
anything else is sent to the agent as a chat message; start it with // to send a leading /";

impl Command {
    pub fn parse(line: &str) -> Self {
        // `//text` sends `/text` to the agent.
        if let Some(escaped) = line.strip_prefix("//") {
            return Command::Chat(format!("/{escaped}"));
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Chat(line.to_string());
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim_start()),
            None => (rest, ""),
        };

        match name {
            "set" => parse_set(args),
            "save" => Command::Save,
            "show" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Invalid(format!("unknown command: /{other}")),
        }
    }
}

fn parse_set(args: &str) -> Command {
    let (field, value) = match args.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (args, ""),
    };
    if field.is_empty() {
        return Command::Invalid("usage: /set <field> <value>".to_string());
    }

    match RecordPatch::field(field, value) {
        Ok(patch) => Command::Set(patch),
        Err(e) => Command::Invalid(e.to_string()),
    }
}
