use super::completion::{CompletionHint, CursorContext, Suggestion, SuggestionEngine, navigate};
use super::*;
use crate::command::{CommandNode, Flag, FlagValue, SessionState, reset_flag_values};
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<String>>>;

fn fixture(seen: Seen) -> CommandNode {
    let apple_seen = seen.clone();
    let melon_seen = seen;

    CommandNode::new("basket")
        .persistent_flag(Flag::bool("verbose", false).shorthand('v').usage("Verbose output"))
        .persistent_flag(Flag::string("secret", "s3").hidden(true))
        .subcommand(
            CommandNode::new("add")
                .short("Add fruit")
                .persistent_flag(Flag::int("count", 1).shorthand('n').usage("How many"))
                .subcommand(
                    CommandNode::new("apple")
                        .short("Add apples")
                        .flag(Flag::string("color", "red").shorthand('c').usage("Apple color"))
                        .action(move |inv| {
                            apple_seen.lock().unwrap().push(format!(
                                "apple {} {}",
                                inv.get_int("count")?,
                                inv.get_string("color")?
                            ));
                            Ok(())
                        }),
                )
                .subcommand(
                    CommandNode::new("melon")
                        .short("Add melons")
                        .flag(Flag::int("size", 3).shorthand('s'))
                        .action(move |inv| {
                            melon_seen.lock().unwrap().push(format!(
                                "melon {} {}",
                                inv.get_int("count")?,
                                inv.get_int("size")?
                            ));
                            Ok(())
                        }),
                ),
        )
        .subcommand(CommandNode::new("addr").short("Address book").action(|_| Ok(())))
        .subcommand(CommandNode::new("show").short("Show basket").action(|_| Ok(())))
        .subcommand(CommandNode::new("debug").short("Dump state").hidden(true).action(|_| Ok(())))
}

fn suggest(root: &CommandNode, line: &str) -> Vec<Suggestion> {
    let (_, word) = completion::word_before_cursor(line, line.len());
    let ctx = CursorContext::resolve(line, word);
    let path = navigate(root, &ctx.tokens);
    let hint = CompletionHint::new(&path, &ctx);
    SuggestionEngine::default().suggest(&hint)
}

fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn test_tokenize_quoting() {
    assert_eq!(tokenize(r#"a "b c" d"#), vec!["a", "b c", "d"]);
    assert_eq!(tokenize(r#"a "b"#), vec!["a", "\"b"]);
    assert!(tokenize("").is_empty());
}

#[test]
fn test_cursor_context() {
    let boundary = CursorContext::resolve("add apple --color ", "");
    assert_eq!((boundary.prev.as_str(), boundary.curr.as_str()), ("--color", ""));

    let mid_word = CursorContext::resolve("add apple --color r", "r");
    assert_eq!((mid_word.prev.as_str(), mid_word.curr.as_str()), ("--color", "r"));
}

#[test]
fn test_navigation() {
    let root = fixture(Seen::default());
    let to = |words: &[&str]| {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        navigate(&root, &tokens).node().name().to_string()
    };

    assert_eq!(to(&["add", "apple", "--color"]), "apple");
    assert_eq!(to(&["add", "banana"]), "add");
    assert_eq!(to(&[]), "basket");
}

#[test]
fn test_flag_value_suppresses_names() {
    let root = fixture(Seen::default());
    assert_eq!(
        suggest(&root, "add apple --color "),
        vec![Suggestion::new("red", "default value")]
    );
    assert_eq!(
        suggest(&root, "add apple -c "),
        vec![Suggestion::new("red", "default value")]
    );
}

#[test]
fn test_flags_before_subcommand() {
    let root = fixture(Seen::default());
    assert_eq!(
        suggest(&root, "add -n 3 apple --color "),
        vec![Suggestion::new("red", "default value")]
    );
    assert_eq!(texts(&suggest(&root, "-v add -n 3 m")), vec!["melon"]);
}

#[test]
fn test_subcommand_prefix() {
    let root = fixture(Seen::default());
    let path = navigate(&root, &[]);
    let ctx = CursorContext::resolve("add", "add");
    let hint = CompletionHint::new(&path, &ctx);

    let suggestions = SuggestionEngine::default().suggest(&hint);
    assert_eq!(texts(&suggestions), vec!["add", "addr"]);
}

#[test]
fn test_partial_word_navigation() {
    let root = fixture(Seen::default());
    assert_eq!(texts(&suggest(&root, "ad")), vec!["add", "addr"]);
    // a finished name selects the child even before the space is typed
    assert!(suggest(&root, "add").is_empty());
    assert_eq!(texts(&suggest(&root, "add me")), vec!["melon"]);
}

#[test]
fn test_children_after_complete_word() {
    let root = fixture(Seen::default());
    let suggestions = suggest(&root, "add ");
    assert_eq!(
        texts(&suggestions),
        vec!["apple", "melon", "--count", "-n", "--verbose", "-v"]
    );
    assert_eq!(suggestions[0].description, "Add apples");
}

#[test]
fn test_flag_names_at_leaf() {
    let root = fixture(Seen::default());
    assert_eq!(texts(&suggest(&root, "add apple --")), vec!["--color", "--count", "--verbose"]);
    assert_eq!(
        texts(&suggest(&root, "add melon -")),
        vec!["--size", "-s", "--count", "-n", "--verbose", "-v"]
    );
}

#[test]
fn test_hidden_never_suggested() {
    let root = fixture(Seen::default());
    for line in ["", "d", "de", "debug", "-", "--", "--s", "add ", "add apple --", "--secret "] {
        let suggestions = suggest(&root, line);
        for hidden in ["debug", "--secret", "s3"] {
            assert!(!texts(&suggestions).contains(&hidden), "{hidden} offered for {line:?}");
        }
    }
}

#[test]
fn test_dispatch_resets_between_lines() {
    let seen = Seen::default();
    let mut root = fixture(seen.clone());
    let session = SessionState::new();

    assert!(execute(&mut root, "add -n 4 apple --color green", &session));
    assert!(execute(&mut root, "add apple", &session));
    assert!(execute(&mut root, "add melon -s 7", &session));
    assert!(execute(&mut root, "add melon", &session));

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["apple 4 green", "apple 1 red", "melon 1 7", "melon 1 3"]
    );
}

#[test]
fn test_dispatch_quoted_value() {
    let seen = Seen::default();
    let mut root = fixture(seen.clone());
    assert!(execute(&mut root, "add apple -c 'dark red'", &SessionState::new()));
    assert_eq!(*seen.lock().unwrap(), vec!["apple 1 dark red"]);
}

#[test]
fn test_reset_idempotent() {
    let mut root = fixture(Seen::default());
    try_execute(&mut root, "add -n 9 apple -c green", &SessionState::new()).unwrap();

    reset_flag_values(&mut root);
    let once = format!("{root:?}");
    reset_flag_values(&mut root);
    assert_eq!(format!("{root:?}"), once);

    let add = root.find_child("add").unwrap();
    assert_eq!(add.flags()[0].value(), &FlagValue::Int(1));
    let apple = add.find_child("apple").unwrap();
    assert_eq!(apple.flags()[0].value(), &FlagValue::String("red".into()));
}

#[test]
fn test_failed_command_keeps_session() {
    let mut root = fixture(Seen::default());
    let session = SessionState::new();
    assert!(!execute(&mut root, "add melon --size big", &session));
    assert!(!execute(&mut root, "nothing-here", &session));
    assert!(session.is_running());
}

#[test]
fn test_shell_end_to_end() {
    let seen = Seen::default();
    let shell = Shell::new(fixture(seen.clone()), ShellOptions::default()).unwrap();

    let (start, suggestions) = shell.completer().suggestions("add ap", 6);
    assert_eq!(start, 4);
    assert_eq!(texts(&suggestions), vec!["apple"]);

    assert!(shell.dispatch("add apple -n 2"));
    let (_, suggestions) = shell.completer().suggestions("add apple -n ", 13);
    assert_eq!(suggestions, vec![Suggestion::new("1", "default value")]);
    assert_eq!(*seen.lock().unwrap(), vec!["apple 2 red"]);
}
