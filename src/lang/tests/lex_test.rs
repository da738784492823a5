use super::*;

#[test]
fn test_blank_separated() {
    assert_eq!(lex("for %a in 1 2"), ["for", "%a", "in", "1", "2"]);
}

#[test]
fn test_extra_blanks_and_tabs() {
    assert_eq!(lex("  echo\t hi   there \r"), ["echo", "hi", "there"]);
}

#[test]
fn test_quotes_group_words() {
    assert_eq!(lex(r#"for %a in "one two" three"#), ["for", "%a", "in", "one two", "three"]);
}

#[test]
fn test_comment() {
    assert_eq!(lex("echo hi # not me"), ["echo", "hi"]);
    assert!(lex("# all comment").is_empty());
}

#[test]
fn test_hash_inside_word() {
    assert_eq!(lex("echo a#b"), ["echo", "a#b"]);
}
