use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("hanoi-cli").chain(args.iter().copied()))
}

#[test]
fn start_accepts_counts_in_range() {
    for rings in ["1", "3", "10"] {
        let cli = parse(&["start", rings]).unwrap();
        assert!(matches!(cli.command, Command::Start { rings: n } if n.to_string() == rings));
    }
}

#[test]
fn start_rejects_counts_out_of_range_before_any_request() {
    for rings in ["0", "11", "abc"] {
        let err = parse(&["start", rings]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "rings = {rings}");
        assert!(err.to_string().contains("valid number of rings"), "{err}");
    }
}

#[test]
fn move_pegs_are_one_based() {
    let cli = parse(&["move", "1", "3"]).unwrap();
    assert!(matches!(cli.command, Command::Move { src: 1, dst: 3 }));
    assert!(parse(&["move", "0", "3"]).is_err());
    assert!(parse(&["move", "1", "4"]).is_err());
}
