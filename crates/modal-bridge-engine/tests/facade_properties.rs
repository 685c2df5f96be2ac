use modal_bridge_engine::editing::{CoalescerState, EditorRegistry, Platform, Translator};
use modal_bridge_engine::host::{MemoryEditor, ShiftDirection, TextViewer};
use modal_bridge_engine::models::Search;
use modal_bridge_engine::{EditorBridge, EditorError, EditorId, Space};
use pretty_assertions::assert_eq;
use rstest::rstest;

const TEXT: &str = "fn main() {\n    let a = 1;\n    let b = a;\n    call(b);\n}\n";

fn open(text: &str) -> (EditorRegistry<MemoryEditor>, EditorId) {
    let mut registry = EditorRegistry::new();
    let id = registry.open(MemoryEditor::new(text));
    (registry, id)
}

fn facade(
    registry: &mut EditorRegistry<MemoryEditor>,
    id: EditorId,
) -> &mut EditorBridge<MemoryEditor> {
    registry.get_mut(id).unwrap()
}

#[test]
fn translation_round_trips_without_folding() {
    let host = MemoryEditor::new(TEXT);
    let translator = Translator::new(host.projection());

    for offset in 0..=TEXT.len() {
        let view = translator.to_view_offset(offset);
        assert_eq!(translator.to_view_offset(translator.to_model_offset(view)), view);
    }
}

#[test]
fn translation_round_trips_through_folds() {
    let mut host = MemoryEditor::new(TEXT);
    host.collapse_lines(0, 3).unwrap();
    let translator = Translator::new(host.projection());

    for offset in 0..=TEXT.len() {
        let view = translator.to_view_offset(offset);
        assert_eq!(translator.to_view_offset(translator.to_model_offset(view)), view);
    }
}

#[rstest]
#[case(0)]
#[case(13)]
#[case(TEXT.len())]
fn identity_translation_is_idempotent(#[case] offset: usize) {
    let translator = Translator::identity();
    let once = translator.to_model_offset(offset);
    assert_eq!(translator.to_model_offset(once), once);
}

#[test]
fn deleted_mark_stays_gone() {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);
    editor.set_position(20);
    editor.set_mark("a");
    assert_eq!(editor.mark("a").map(|mark| mark.offset), Some(20));

    // Delete the whole second line
    editor.replace(12, 15, "").unwrap();

    assert_eq!(editor.mark("a"), None);
    editor.replace(12, 0, "    let a = 1;\n").unwrap();
    assert_eq!(editor.mark("a"), None);
}

#[test]
fn mark_follows_edits_before_it() {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);
    editor.set_position(31);
    editor.set_mark("b");

    editor.replace(0, 0, "// header\n").unwrap();

    let mark = editor.mark("b").unwrap();
    assert_eq!(mark.offset, 41);
    assert_eq!(mark.line.number, 3);
}

#[test]
fn nested_changes_are_one_undo_step() {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);

    editor.begin_change();
    editor.begin_change();
    editor.replace(0, 2, "pub fn").unwrap();
    editor.end_change().unwrap();
    editor.replace(0, 0, "// x\n").unwrap();
    editor.end_change().unwrap();

    assert_eq!(editor.undo_state(), CoalescerState::Idle);
    assert_eq!(editor.host().undo_depth(), 1);
    editor.undo();
    assert_eq!(editor.host().text(), TEXT);
    editor.redo();
    assert!(editor.host().text().starts_with("// x\npub fn main()"));
}

#[test]
fn unbalanced_end_change_is_reported() {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);

    assert!(matches!(
        editor.end_change(),
        Err(EditorError::UnbalancedChange)
    ));
    assert_eq!(editor.undo_state(), CoalescerState::Idle);
}

#[test]
fn undo_marks_split_steps() {
    let (mut registry, id) = open("abc");
    let editor = facade(&mut registry, id);

    editor.set_undo_mark();
    editor.replace(0, 0, "1").unwrap();
    editor.replace(0, 0, "2").unwrap();
    editor.set_undo_mark();
    editor.replace(0, 0, "3").unwrap();

    editor.undo();
    assert_eq!(editor.host().text(), "21abc");
    editor.undo();
    assert_eq!(editor.host().text(), "abc");
    editor.undo();
    assert_eq!(editor.host().text(), "abc");
}

#[rstest]
#[case(Space::Model, Search::forward("let"), 0)]
#[case(Space::Model, Search::forward("let"), 30)]
#[case(Space::Model, Search::backward("a"), 40)]
#[case(Space::Model, Search::forward("missing"), 5)]
#[case(Space::View, Search::forward("call").whole_word(), 3)]
fn find_leaves_caret_where_it_was(
    #[case] space: Space,
    #[case] search: Search,
    #[case] from: usize,
) {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);
    editor.set_space(space);
    editor.set_position(from);

    editor.find(&search, from);

    assert_eq!(editor.position(), from);
}

#[test]
fn shift_left_is_one_native_call_in_one_undo_group() {
    let (mut registry, id) = open(TEXT);
    let editor = facade(&mut registry, id);

    editor.shift(2, 3, -1).unwrap();

    assert_eq!(editor.host().shift_calls(), &[ShiftDirection::Left]);
    assert_eq!(editor.host().undo_depth(), 1);
    assert_eq!(
        editor.host().text(),
        "fn main() {\n    let a = 1;\nlet b = a;\ncall(b);\n}\n"
    );
    editor.undo();
    assert_eq!(editor.host().text(), TEXT);
}

#[test]
fn view_space_queries_skip_folded_lines() {
    let mut registry = EditorRegistry::new();
    let mut host = MemoryEditor::new(TEXT);
    host.collapse_lines(1, 3).unwrap();
    let id = registry.open(host);
    let editor = facade(&mut registry, id);

    editor.set_space(Space::View);
    let table: Vec<_> = (0..editor.number_of_lines())
        .map(|line| editor.line_information_at(line).unwrap())
        .collect();

    insta::assert_yaml_snapshot!("view_line_table", table);
}

#[test]
fn mark_resolves_in_active_space() {
    let mut registry = EditorRegistry::new();
    let mut host = MemoryEditor::new(TEXT);
    host.collapse_lines(0, 2).unwrap();
    let id = registry.open(host);
    let editor = facade(&mut registry, id);
    editor.set_position(42);
    editor.set_mark("c");

    editor.set_space(Space::View);

    insta::assert_yaml_snapshot!("folded_mark", editor.mark("c"));
}
