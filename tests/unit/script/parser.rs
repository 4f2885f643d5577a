use super::*;

#[test]
fn command_and_output_lines() {
    let entries = parse(&["> whoami", "root"]);
    assert_eq!(
        entries,
        vec![ScriptEntry::command("whoami"), ScriptEntry::output("root")]
    );
    assert!(entries[0].show_prompt);
    assert!(!entries[1].show_prompt);
}

#[test]
fn marker_and_following_whitespace_are_stripped() {
    let entries = parse(&["   >    ls -la  ", ">echo"]);
    assert_eq!(entries[0].text, "ls -la  ");
    assert_eq!(entries[1].text, "echo");
    assert_eq!(entries[1].kind, EntryKind::Command);
}

#[test]
fn output_text_keeps_its_indentation() {
    let entries = parse(&["    indented output"]);
    assert_eq!(entries[0].text, "    indented output");
}

#[test]
fn instant_block_marks_lines_and_is_not_emitted() {
    let entries = parse(&["> ls", "!!", "a.txt", "b.txt", "!!", "tail"]);
    assert_eq!(entries.len(), 4);
    assert!(!entries[0].instant);
    assert!(entries[1].instant && entries[2].instant);
    assert!(!entries[3].instant);
}

#[test]
fn marker_with_surrounding_whitespace_still_toggles() {
    let entries = parse(&["  !!  ", "x", "!!"]);
    assert_eq!(entries, vec![ScriptEntry::output("x").instant()]);
}

#[test]
fn unterminated_instant_block_runs_to_end() {
    let entries = parse(&["> cat log", "!!", "one", "two"]);
    assert_eq!(entries.len(), 3);
    assert!(entries[1].instant);
    assert!(entries[2].instant);
}

#[test]
fn commands_inside_instant_block_are_instant() {
    let entries = parse(&["!!", "> fast", "!!"]);
    assert_eq!(entries, vec![ScriptEntry::command("fast").instant()]);
}

#[test]
fn blank_interior_lines_are_preserved() {
    let entries = parse_text("> a\n\nb\n\n\n");
    assert_eq!(
        entries,
        vec![
            ScriptEntry::command("a"),
            ScriptEntry::output(""),
            ScriptEntry::output("b"),
        ]
    );
}

#[test]
fn split_input_strips_only_trailing_blanks() {
    assert_eq!(split_input("a\r\n\r\nb\r\n  \n"), vec!["a", "", "b"]);
    assert!(split_input("").is_empty());
    assert!(split_input("\n \n\t").is_empty());
}

#[test]
fn parsing_is_idempotent() {
    let lines = ["> make", "!!", "cc main.c", "!!", "done"];
    assert_eq!(parse(&lines), parse(&lines));
}

#[test]
fn custom_syntax() {
    let syntax = ScriptSyntax {
        command_marker: '$',
        instant_marker: "##".to_owned(),
    };
    let entries = parse_with(&["$ pwd", "##", "/root", "##"], &syntax);
    assert_eq!(
        entries,
        vec![
            ScriptEntry::command("pwd"),
            ScriptEntry::output("/root").instant()
        ]
    );
}

#[test]
fn char_len_counts_scalars() {
    assert_eq!(ScriptEntry::output("héllo").char_len(), 5);
}
