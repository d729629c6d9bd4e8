use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod settings;
pub mod workspace;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Help => Ok(help_text()),
        CliVerb::Version => Ok(format!("crewdeck {}", env!("CARGO_PKG_VERSION"))),
        CliVerb::Init => settings::cmd_init(),
        CliVerb::Check => settings::cmd_check(),
        CliVerb::Views => workspace::cmd_views(&args[1..]),
        CliVerb::Route => workspace::cmd_route(&args[1..]),
        CliVerb::Open => crate::tui::shell::cmd_open(&args[1..]),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
