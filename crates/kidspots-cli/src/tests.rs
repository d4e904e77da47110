use super::*;

#[test]
fn parses_query_command() {
    let cli = Cli::try_parse_from(["kidspots-cli", "query"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Query));
}

#[test]
fn parses_types_command() {
    let cli = Cli::try_parse_from(["kidspots-cli", "types"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Types));
}

#[test]
fn fetch_defaults_to_summary_output() {
    let cli = Cli::try_parse_from(["kidspots-cli", "fetch"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Fetch { json: false }));
}

#[test]
fn fetch_accepts_json_flag() {
    let cli =
        Cli::try_parse_from(["kidspots-cli", "fetch", "--json"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Fetch { json: true }));
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["kidspots-cli"]).is_err());
}
