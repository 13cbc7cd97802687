use golfer_status_bot::model::{format_score, parse_position_rank, parse_score};

#[test]
fn test1_parse_score_even_markers() {
    assert_eq!(parse_score("E"), Some(0));
    assert_eq!(parse_score("Even"), Some(0));
    assert_eq!(parse_score("--"), Some(0));
    assert_eq!(parse_score(""), Some(0));
    assert_eq!(parse_score("  E "), Some(0));
}

#[test]
fn test1_parse_score_signed() {
    assert_eq!(parse_score("+3"), Some(3));
    assert_eq!(parse_score("-2"), Some(-2));
    assert_eq!(parse_score("4"), Some(4));
    assert_eq!(parse_score("-12"), Some(-12));
    assert_eq!(parse_score("CUT"), None);
    assert_eq!(parse_score("68*"), None);
}

#[test]
fn test1_format_score() {
    assert_eq!(format_score(None), "E");
    assert_eq!(format_score(Some(0)), "E");
    assert_eq!(format_score(Some(5)), "+5");
    assert_eq!(format_score(Some(-7)), "-7");

    assert_eq!(format_score(parse_score("+3")), "+3");
    assert_eq!(format_score(parse_score("-2")), "-2");
    assert_eq!(format_score(parse_score("E")), "E");
}

#[test]
fn test1_parse_position_rank() {
    assert_eq!(parse_position_rank("T5"), Some(5));
    assert_eq!(parse_position_rank("1st"), Some(1));
    assert_eq!(parse_position_rank("1"), Some(1));
    assert_eq!(parse_position_rank("T-12"), Some(12));
    assert_eq!(parse_position_rank("22nd"), Some(22));
    assert_eq!(parse_position_rank("t3"), Some(3));
    assert_eq!(parse_position_rank(""), None);
    assert_eq!(parse_position_rank("CUT"), None);
}
