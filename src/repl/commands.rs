//! REPL input parsing

/// One line of REPL input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Free text for the assistant, or a bare suggestion number
    Message(String),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Symptoms(String),
    Compare(String),
    Plans,
    Locate(String),
    Insurance,
    Intake {
        location: String,
        procedure: String,
        insurance: Option<String>,
    },
    History,
    Quit,
    /// Known command missing its argument; carries the usage line
    Usage(&'static str),
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  /help                                   - Show this help
  /version                                - Show version info
  /symptoms <text>                        - Analyze symptoms
  /compare <text>                         - Compare hospital prices for a request
  /plans                                  - List supported insurance plans
  /locate <procedure>                     - Price a procedure near you
  /insurance                              - Start an insurance comparison
  /intake <location> | <procedure> [| <insurance>]
                                          - Submit the intake form
  /history                                - Show the conversation so far
  /quit                                   - Exit
Type a suggestion's number to send it.";

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.starts_with('/') {
            return Input::Command(Command::parse(trimmed));
        }
        Input::Message(trimmed.to_string())
    }
}

impl Command {
    fn parse(cmd: &str) -> Self {
        let (command, arg) = match cmd.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (cmd, ""),
        };

        let with_arg = |usage: &'static str, build: fn(String) -> Command| {
            if arg.is_empty() {
                Command::Usage(usage)
            } else {
                build(arg.to_string())
            }
        };

        match command {
            "/help" => Command::Help,
            "/version" => Command::Version,
            "/symptoms" => with_arg("Usage: /symptoms <describe how you feel>", Command::Symptoms),
            "/compare" => with_arg("Usage: /compare <procedures and city>", Command::Compare),
            "/plans" => Command::Plans,
            "/locate" => with_arg("Usage: /locate <procedure>", Command::Locate),
            "/insurance" => Command::Insurance,
            "/intake" => Self::parse_intake(arg),
            "/history" => Command::History,
            "/quit" | "/exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }

    fn parse_intake(arg: &str) -> Self {
        const USAGE: &str = "Usage: /intake <location> | <procedure> [| <insurance>]";

        let fields: Vec<&str> = arg.split('|').map(str::trim).collect();
        match fields.as_slice() {
            [location, procedure] | [location, procedure, ""]
                if !location.is_empty() && !procedure.is_empty() =>
            {
                Command::Intake {
                    location: location.to_string(),
                    procedure: procedure.to_string(),
                    insurance: None,
                }
            }
            [location, procedure, insurance]
                if !location.is_empty() && !procedure.is_empty() =>
            {
                Command::Intake {
                    location: location.to_string(),
                    procedure: procedure.to_string(),
                    insurance: Some(insurance.to_string()),
                }
            }
            _ => Command::Usage(USAGE),
        }
    }
}
