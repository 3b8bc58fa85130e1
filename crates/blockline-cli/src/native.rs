//! In-block editing for keys the editor leaves to the input element.

use blockline_engine::text::byte_index;
use blockline_engine::{EditingBlock, LineMetrics, MonospaceSurface, Point, TextSurface};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies the default text-input behaviour of `event` to `editor`.
///
/// Returns whether the key did anything.
pub fn apply_key(
    surface: &MonospaceSurface,
    width: f32,
    editor: &mut EditingBlock,
    event: &KeyEvent,
) -> bool {
    let plain = !event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match event.code {
        KeyCode::Char(c) if plain => {
            editor.insert(c.encode_utf8(&mut [0; 4]));
        }
        KeyCode::Backspace => delete_backward(editor),
        KeyCode::Delete => delete_forward(editor),
        KeyCode::Left => editor.set_caret(editor.caret().saturating_sub(1)),
        KeyCode::Right => editor.set_caret(editor.caret() + 1),
        KeyCode::Up => move_vertically(surface, width, editor, false),
        KeyCode::Down => move_vertically(surface, width, editor, true),
        KeyCode::Home => {
            let line = current_line(surface, width, editor);
            editor.set_caret(line.start);
        }
        KeyCode::End => {
            let metrics = LineMetrics::measure(surface, editor.text(), width);
            let info = metrics.line_info(editor.caret());
            let line = metrics.lines()[info.line_index];
            let end = if info.line_index + 1 == metrics.line_count() {
                line.end
            } else {
                line.content_end
            };
            editor.set_caret(end);
        }
        _ => return false,
    }
    true
}

/// A click on the block already being edited moves its caret.
pub fn click(surface: &MonospaceSurface, width: f32, editor: &mut EditingBlock, point: Point) {
    let offset = surface.offset_at(editor.text(), width, point);
    editor.set_caret(offset);
}

fn delete_backward(editor: &mut EditingBlock) {
    let caret = editor.caret();
    if caret == 0 {
        return;
    }
    let mut text = editor.text().to_string();
    text.replace_range(byte_index(&text, caret - 1)..byte_index(&text, caret), "");
    editor.set_caret(caret - 1);
    editor.set_text(text);
}

fn delete_forward(editor: &mut EditingBlock) {
    let caret = editor.caret();
    if caret >= editor.len() {
        return;
    }
    let mut text = editor.text().to_string();
    text.replace_range(byte_index(&text, caret)..byte_index(&text, caret + 1), "");
    editor.set_text(text);
}

fn current_line(
    surface: &MonospaceSurface,
    width: f32,
    editor: &EditingBlock,
) -> blockline_engine::VisualLine {
    let metrics = LineMetrics::measure(surface, editor.text(), width);
    metrics.lines()[metrics.line_info(editor.caret()).line_index]
}

// Same column on the neighbouring visual line; past the first or last line
// the caret goes to the start or end of the text.
fn move_vertically(surface: &MonospaceSurface, width: f32, editor: &mut EditingBlock, down: bool) {
    let text = editor.text();
    let caret = editor.caret();
    let metrics = LineMetrics::measure(surface, text, width);
    let line = metrics.line_info(caret).line_index;

    let target = if down {
        Some(line + 1).filter(|&target| target < metrics.line_count())
    } else {
        line.checked_sub(1)
    };
    let Some(target) = target else {
        let edge = if down { editor.len() } else { 0 };
        editor.set_caret(edge);
        return;
    };

    let x = surface.caret_x(text, width, caret);
    let y = (target as f32 + 0.5) * surface.line_height;
    let offset = surface.offset_at(text, width, Point::new(x, y));
    editor.set_caret(offset);
}
