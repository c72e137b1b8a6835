use super::*;

#[test]
fn unescape_without_escapes_borrows() {
    assert!(matches!(unescape("plain", 0).unwrap(), Cow::Borrowed("plain")));
}

#[test]
fn unescape_decodes_controls_and_literals() {
    assert_eq!(unescape(r"a\nb", 0).unwrap(), "a\nb");
    assert_eq!(unescape(r"\t\r", 0).unwrap(), "\t\r");
    assert_eq!(unescape(r"P\\I", 0).unwrap(), r"P\I");
    assert_eq!(unescape(r"P\(", 0).unwrap(), "P(");
    assert_eq!(unescape(r"Ax", 0).unwrap(), "Ax");
}

#[test]
fn unescape_reports_dangling_escape_offset() {
    let err = unescape(r"abc\", 10).unwrap_err();
    assert_eq!(err.offset, 13);
    assert!(err.message.contains("dangling"));
}

#[test]
fn unescape_rejects_short_unicode_escape() {
    assert!(unescape(r"\u12", 0).is_err());
    assert!(unescape(r"\u12zz", 0).is_err());
}

#[test]
fn escape_is_inverse_of_unescape() {
    for text in ["a (b) c", "=ADD", "@name", "#This", "50%", "tab\there", "back\\slash"] {
        let escaped = escape(text);
        assert_eq!(unescape(&escaped, 0).unwrap(), text);
    }
}

#[test]
fn find_closing_paren_tracks_depth_and_escapes() {
    assert_eq!(find_closing_paren("a)"), Some(1));
    assert_eq!(find_closing_paren("(a) b)"), Some(5));
    assert_eq!(find_closing_paren(r"\) b)"), Some(4));
    assert_eq!(find_closing_paren("(a"), None);
}

#[test]
fn find_unescaped_skips_escaped_matches() {
    assert_eq!(find_unescaped(r"a\ b c", |c| c == ' '), Some(4));
    assert_eq!(find_unescaped("abc", |c| c == ' '), None);
}
