use super::*;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("typerel").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_assignable_command() {
    let args = parse(&["assignable", "IEnumerable<int>", "List<int>"]);
    assert_eq!(
        args.command,
        Command::Assignable {
            target: "IEnumerable<int>".into(),
            candidate: "List<int>".into(),
        }
    );
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.universes.is_empty());
}

#[test]
fn test_match_vars_are_comma_separated() {
    let args = parse(&["match", "Dictionary<int, string>", "IDictionary<K, V>", "--vars", "K,V"]);
    let Command::Match { vars, .. } = args.command else {
        panic!("expected match command");
    };
    assert_eq!(vars, ["K", "V"]);
}

#[test]
fn test_global_options_after_subcommand() {
    let args = parse(&[
        "common",
        "SqlCommand",
        "OdbcCommand",
        "--format",
        "json",
        "-u",
        "a.json",
        "--universe",
        "b.json",
    ]);
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.universes, [PathBuf::from("a.json"), PathBuf::from("b.json")]);
    assert_eq!(
        args.command,
        Command::Common {
            types: vec!["SqlCommand".into(), "OdbcCommand".into()]
        }
    );
}

#[test]
fn test_common_requires_a_type() {
    assert!(CliArgs::try_parse_from(["typerel", "common"]).is_err());
}

#[test]
fn test_unknown_format_is_rejected() {
    assert!(CliArgs::try_parse_from(["typerel", "--format", "yaml", "show", "int"]).is_err());
}
