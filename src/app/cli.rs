#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Help,
    Version,
    Init,
    Check,
    Views,
    Route,
    Open,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "help" => CliVerb::Help,
        "version" => CliVerb::Version,
        "init" => CliVerb::Init,
        "check" => CliVerb::Check,
        "views" => CliVerb::Views,
        "route" => CliVerb::Route,
        "open" => CliVerb::Open,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  init                         Write a starter settings file if none exists".to_string(),
        "  check                        Validate settings and print a summary".to_string(),
        "  views <workspace>            List a workspace's views with lock markers".to_string(),
        "  route <workspace> <hint>     Resolve a deep-link hint to its landing view".to_string(),
        "  open <workspace> [hint]      Open the workspace shell".to_string(),
        "  version                      Print the crewdeck version".to_string(),
        "  help                         Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
