use blockline_engine::{
    ControllerSettings, Document, EditorController, EditorHooks, HtmlMarkup, Key, KeyOutcome,
    MonospaceSurface, Point, PointerOutcome, PointerPress, TextSurface,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Default)]
struct Hooks {
    saves: usize,
    last_saved: Vec<String>,
}

impl EditorHooks for Hooks {
    fn persist(&mut self, document: &Document) {
        self.saves += 1;
        self.last_saved = document.raw_texts(&HtmlMarkup);
    }

    fn navigate_to(&mut self, _title: &str, _open_in_panel: bool) {}
}

type Editor = EditorController<MonospaceSurface, HtmlMarkup, Hooks>;

fn editor(width: f32) -> Editor {
    EditorController::new(MonospaceSurface::default(), HtmlMarkup, Hooks::default()).with_settings(
        ControllerSettings {
            width,
            ..ControllerSettings::default()
        },
    )
}

/// Clicks block `index` at column `x` of its first row and lets it mount.
fn focus(editor: &mut Editor, doc: &mut Document, index: usize, x: f32) {
    let outcome = editor.on_pointer_down(
        doc,
        PointerPress {
            index,
            point: Point::new(x, 0.0),
            shift: false,
            in_side_panel: false,
        },
    );
    assert_eq!(outcome, PointerOutcome::Activated(index));
    editor.on_mounted(doc);
}

fn caret(doc: &Document) -> usize {
    doc.active().map(|e| e.caret()).unwrap()
}

fn texts(doc: &Document) -> Vec<String> {
    doc.raw_texts(&HtmlMarkup)
}

#[test]
fn enter_then_backspace_restores_the_block() {
    // Given "hello world" focused at offset 5
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["hello world", "foo"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 5.0);
    assert_eq!(caret(&doc), 5);

    // When splitting
    assert_eq!(ed.handle_key(&mut doc, Key::Enter), KeyOutcome::Handled);

    // Then the tail moves into a new focused block
    assert_eq!(texts(&doc), vec!["hello", " world", "foo"]);
    assert_eq!(doc.active_index(), Some(1));
    assert_eq!(caret(&doc), 0);
    assert_eq!(ed.hooks().saves, 1);

    // When merging back
    assert_eq!(ed.handle_key(&mut doc, Key::Backspace), KeyOutcome::Handled);
    ed.on_mounted(&mut doc);

    // Then the text is whole again with the caret at the seam
    assert_eq!(texts(&doc), vec!["hello world", "foo"]);
    assert_eq!(doc.active_index(), Some(0));
    assert_eq!(caret(&doc), 5);
}

#[rstest]
fn split_then_merge_is_lossless(#[values(0, 1, 2, 3, 4, 5, 6)] k: usize) {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["before", "abcdef", "after"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 1, k as f32);
    assert_eq!(caret(&doc), k);

    ed.handle_key(&mut doc, Key::Enter);
    assert_eq!(doc.len(), 4);
    ed.handle_key(&mut doc, Key::Backspace);
    ed.on_mounted(&mut doc);

    assert_eq!(texts(&doc), vec!["before", "abcdef", "after"]);
    assert_eq!(doc.active_index(), Some(1));
    assert_eq!(caret(&doc), k);
}

#[test]
fn split_then_merge_after_whitespace_lands_at_trimmed_end() {
    // Given "ab  cd" focused inside the run of spaces
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["ab  cd"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 3.0);
    assert_eq!(caret(&doc), 3);

    // When splitting and merging straight back
    ed.handle_key(&mut doc, Key::Enter);
    assert_eq!(texts(&doc), vec!["ab ", " cd"]);
    ed.handle_key(&mut doc, Key::Backspace);
    ed.on_mounted(&mut doc);

    // Then the text is restored but the caret sits where "ab" ends
    assert_eq!(texts(&doc), vec!["ab  cd"]);
    assert_eq!(caret(&doc), 2);
}

#[test]
fn delete_at_end_pulls_next_block_up() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc", "def"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 3.0);

    assert_eq!(ed.handle_key(&mut doc, Key::Delete), KeyOutcome::Handled);

    assert_eq!(texts(&doc), vec!["abcdef"]);
    assert_eq!(caret(&doc), 3);
}

#[test]
fn delete_mid_text_is_left_to_the_input() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc", "def"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 1.0);
    assert_eq!(ed.handle_key(&mut doc, Key::Delete), KeyOutcome::Ignored);
    assert_eq!(texts(&doc), vec!["abc", "def"]);
}

#[test]
fn delete_inside_trailing_whitespace_is_left_to_the_input() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc  ", "def"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 4.0);
    assert_eq!(caret(&doc), 4);

    assert_eq!(ed.handle_key(&mut doc, Key::Delete), KeyOutcome::Ignored);

    assert_eq!(texts(&doc), vec!["abc  ", "def"]);
    assert_eq!(doc.len(), 2);
}

#[test]
fn merged_text_survives_rendering() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["see [[Home]] ", "<b>&amp;</b>"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 13.0);
    ed.handle_key(&mut doc, Key::Delete);
    ed.on_blur(&mut doc);

    assert_eq!(doc.editing_count(), 0);
    assert_eq!(texts(&doc), vec!["see [[Home]] <b>&amp;</b>"]);
    assert_eq!(ed.hooks().last_saved, texts(&doc));
}

#[test]
fn left_at_start_moves_to_end_of_previous_content() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc   ", "def"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 1, 0.0);

    assert_eq!(ed.handle_key(&mut doc, Key::ArrowLeft), KeyOutcome::Handled);
    ed.on_mounted(&mut doc);

    assert_eq!(doc.active_index(), Some(0));
    assert_eq!(caret(&doc), 3);
    assert_eq!(doc.editing_count(), 1);
}

#[test]
fn right_at_content_end_moves_to_start_of_next() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc", "def"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 3.0);

    assert_eq!(ed.handle_key(&mut doc, Key::ArrowRight), KeyOutcome::Handled);
    ed.on_mounted(&mut doc);

    assert_eq!(doc.active_index(), Some(1));
    assert_eq!(caret(&doc), 0);
}

#[rstest]
#[case(0, Key::ArrowUp)]
#[case(0, Key::ArrowLeft)]
#[case(1, Key::ArrowDown)]
#[case(1, Key::ArrowRight)]
fn arrows_off_the_document_edges_are_no_ops(#[case] index: usize, #[case] key: Key) {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["abc", "def"], &HtmlMarkup);
    let x = if index == 0 { 0.0 } else { 3.0 };
    focus(&mut ed, &mut doc, index, x);
    let before = caret(&doc);

    assert_eq!(ed.handle_key(&mut doc, key), KeyOutcome::Ignored);

    assert_eq!(doc.active_index(), Some(index));
    assert_eq!(caret(&doc), before);
    assert_eq!(texts(&doc), vec!["abc", "def"]);
}

#[rstest]
fn up_then_down_keeps_the_column(#[values(0, 1, 2, 3)] column: usize) {
    // Given a wrapped block above a short one
    let width = 10.0;
    let mut ed = editor(width);
    let mut doc = Document::from_texts(["one two three four", "xyz"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 1, column as f32);
    let surface = MonospaceSurface::default();
    let start_x = surface.caret_x("xyz", width, column);

    // When moving up into the last visual line of the block above
    assert_eq!(ed.handle_key(&mut doc, Key::ArrowUp), KeyOutcome::Handled);
    ed.on_mounted(&mut doc);
    assert_eq!(doc.active_index(), Some(0));
    let up_x = surface.caret_x("one two three four", width, caret(&doc));
    assert_eq!(up_x, start_x);

    // And straight back down
    assert_eq!(ed.handle_key(&mut doc, Key::ArrowDown), KeyOutcome::Handled);
    ed.on_mounted(&mut doc);

    // Then the caret is back where it started
    assert_eq!(doc.active_index(), Some(1));
    assert_eq!(caret(&doc), column);
}

#[test]
fn every_step_leaves_at_most_one_editor() {
    let mut ed = editor(8.0);
    let mut doc = Document::from_source("alpha beta gamma\n\tdelta\n\nepsilon", &HtmlMarkup);
    focus(&mut ed, &mut doc, 0, 2.0);

    let keys = [
        Key::Enter,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowDown,
        Key::Tab,
        Key::ArrowLeft,
        Key::Delete,
        Key::ArrowRight,
        Key::Backspace,
        Key::ArrowDown,
        Key::Enter,
        Key::Backspace,
    ];
    for key in keys {
        ed.handle_key(&mut doc, key);
        assert!(doc.editing_count() <= 1, "after {key:?}");
        ed.on_mounted(&mut doc);
        assert!(doc.editing_count() <= 1, "after mounting {key:?}");
    }

    ed.on_blur(&mut doc);
    assert_eq!(doc.editing_count(), 0);
}

#[test]
fn document_snapshot_after_editing() {
    let mut ed = editor(80.0);
    let mut doc = Document::from_texts(["plan trip", "pack", "bags"], &HtmlMarkup);
    focus(&mut ed, &mut doc, 1, 4.0);
    ed.handle_key(&mut doc, Key::Delete);

    insta::assert_yaml_snapshot!(doc, @r"
    blocks:
      - Rendered:
          markup: plan trip
      - Editing:
          text: packbags
          caret: 4
          pending: ~
    ");
}
