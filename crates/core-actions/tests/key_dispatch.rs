mod common;

use common::{command_line, line_col, text, type_keys};
use core_actions::{DispatchError, DispatchResult, Dispatcher};
use core_host::{MemoryHost, TextEditor};
use pretty_assertions::assert_eq;

#[test]
fn dollar_ignores_repeat() {
    let d = Dispatcher::new();
    let mut host = MemoryHost::with_document("t", "first line\nsecond line\n").unwrap();
    for repeat in [1, 3, 999_999] {
        host.editor_mut().unwrap().go_to_line(1);
        d.dispatch_key(&mut host, "$", repeat).unwrap();
        assert_eq!(host.editor().unwrap().line_col(), (0, 10));
    }
}

#[test]
fn unregistered_key_changes_nothing() {
    let d = Dispatcher::new();
    let mut host = MemoryHost::with_document("t", "abc\ndef").unwrap();
    host.editor_mut().unwrap().move_cursor(
        core_host::MoveOperation::Right,
        core_host::MoveMode::MoveAnchor,
        2,
    );
    let before = host.editor().unwrap().cursor();
    let err = d.dispatch_key(&mut host, "x", 4).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownKey(ref k) if k == "x"));
    assert_eq!(err.to_string(), "unknown key \"x\"");
    assert_eq!(host.editor().unwrap().cursor(), before);
    assert_eq!(host.editor().unwrap().text(), "abc\ndef");
}

#[test]
fn undo_with_zero_repeat_is_noop() {
    let d = Dispatcher::new();
    let mut host = MemoryHost::with_document("t", "abc").unwrap();
    host.editor_mut().unwrap().insert_text("X");
    let res = d.dispatch_key(&mut host, "u", 0).unwrap();
    assert_eq!(res, DispatchResult::command_line());
    assert_eq!(host.editor().unwrap().text(), "Xabc");
    d.dispatch_key(&mut host, "u", 1).unwrap();
    assert_eq!(host.editor().unwrap().text(), "abc");
}

#[test]
fn prefixed_tokens_with_symbols_resolve_by_name() {
    // `d0` is spelled `dZERO`, which is not registered
    let d = Dispatcher::new();
    let mut host = MemoryHost::with_document("t", "abc").unwrap();
    let err = d.dispatch_key(&mut host, "d0", 1).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownKey(ref k) if k == "dZERO"));
}

#[test]
fn counted_motions_through_the_command_line() {
    let mut cl = command_line("l0\nl1\nl2\nl3\nl4\n");
    type_keys(&mut cl, "3j");
    assert_eq!(line_col(&cl), (3, 0));
    type_keys(&mut cl, "2k$");
    assert_eq!(line_col(&cl), (1, 2));
    type_keys(&mut cl, "0");
    assert_eq!(line_col(&cl), (1, 0));
    type_keys(&mut cl, "1 ");
    assert_eq!(line_col(&cl), (1, 1));
    assert_eq!(cl.buffer(), "");
}

#[test]
fn deletes_and_undo_through_the_command_line() {
    let mut cl = command_line("one two\nthree\nfour\n");
    type_keys(&mut cl, "dw");
    assert_eq!(text(&cl), " two\nthree\nfour\n");
    type_keys(&mut cl, "j2dd");
    assert_eq!(text(&cl), " two\n");
    type_keys(&mut cl, "2u");
    assert_eq!(text(&cl), "one two\nthree\nfour\n");
    type_keys(&mut cl, "D");
    assert_eq!(text(&cl), "\nthree\nfour\n");
}

#[test]
fn open_line_enters_insert_mode() {
    let mut cl = command_line("one\ntwo");
    type_keys(&mut cl, "o");
    assert_eq!(cl.focus(), core_actions::Focus::Editor);
    assert_eq!(text(&cl), "one\n\ntwo");
    assert_eq!(line_col(&cl), (1, 0));
}
