use blockline_engine::markup::{InlineNode, Span as TextSpan, find_urls, parse_inline};
use blockline_engine::{
    Document, MarkupConverter, MonospaceSurface, Point, TextSurface, VisualLine,
    layout::current_line_info,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Pane, PaneId};

/// Columns reserved left of every block for its bullet.
pub const GUTTER: u16 = 2;

/// Where one block sits in a pane, in rows from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub index: usize,
    pub top: usize,
    pub text: String,
    pub lines: Vec<VisualLine>,
    pub editing: bool,
}

impl BlockView {
    fn rows(&self) -> usize {
        self.lines.len()
    }
}

/// Lays out every block of `document` at `width` text columns.
pub fn layout_blocks<M: MarkupConverter + ?Sized>(
    document: &Document,
    markup: &M,
    surface: &MonospaceSurface,
    width: f32,
) -> Vec<BlockView> {
    let mut top = 0;
    document
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let text = block.raw_text(markup).into_owned();
            let lines = surface.wrap(&text, width);
            let view = BlockView {
                index,
                top,
                text,
                lines,
                editing: block.is_editing(),
            };
            top += view.rows();
            view
        })
        .collect()
}

/// The block under a terminal cell, with the point relative to the block.
pub fn hit_test(
    views: &[BlockView],
    area: Rect,
    scroll: usize,
    column: u16,
    row: u16,
) -> Option<(usize, Point)> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let y = usize::from(row - area.y) + scroll;
    let view = views
        .iter()
        .find(|view| y >= view.top && y < view.top + view.rows())?;
    let x = column.saturating_sub(area.x + GUTTER);
    Some((view.index, Point::new(f32::from(x), (y - view.top) as f32)))
}

/// Row and column of the active block's caret, in page coordinates.
pub fn caret_cell(
    document: &Document,
    views: &[BlockView],
    surface: &MonospaceSurface,
    width: f32,
) -> Option<(usize, u16)> {
    let index = document.active_index()?;
    let editor = document.active()?;
    let view = views.get(index)?;
    let info = current_line_info(editor.caret(), &view.lines);
    let x = surface.caret_x(editor.text(), width, editor.caret());
    Some((view.top + info.line_index, x as u16))
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let [body, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    let mut cursor = None;
    let focus = app.focus;
    let (surface, markup) = (*app.controller.surface(), *app.controller.markup());
    if let Some(side) = app.side.as_mut() {
        let [main_area, side_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(body);
        draw_pane(f, &mut app.main, &surface, &markup, focus == PaneId::Main, main_area, &mut cursor);
        draw_pane(f, side, &surface, &markup, focus == PaneId::Side, side_area, &mut cursor);
    } else {
        draw_pane(f, &mut app.main, &surface, &markup, true, body, &mut cursor);
    }

    if let Some(position) = cursor {
        f.set_cursor_position(position);
    }

    let status_line = match app.status() {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        None => Line::from(vec![
            Span::raw("Esc: Stop editing | "),
            Span::raw("Shift-click link: Side panel | "),
            Span::raw("Ctrl-W: Close panel | "),
            Span::raw("Ctrl-Q: Quit"),
        ]),
    };
    f.render_widget(Paragraph::new(status_line), status);
}

fn draw_pane<M: MarkupConverter>(
    f: &mut Frame,
    pane: &mut Pane,
    surface: &MonospaceSurface,
    markup: &M,
    focused: bool,
    area: Rect,
    cursor: &mut Option<Position>,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let frame = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(pane.title.as_str());
    let inner = frame.inner(area);
    f.render_widget(frame, area);

    pane.area = inner;
    let width = f32::from(pane.text_width());
    let views = layout_blocks(&pane.document, markup, surface, width);
    let height = usize::from(inner.height);

    if let Some((row, column)) = caret_cell(&pane.document, &views, surface, width) {
        if row < pane.scroll {
            pane.scroll = row;
        } else if height > 0 && row >= pane.scroll + height {
            pane.scroll = row + 1 - height;
        }
        if focused && row >= pane.scroll && row < pane.scroll + height {
            let column = column.min(pane.text_width().saturating_sub(1));
            *cursor = Some(Position::new(
                inner.x + GUTTER + column,
                inner.y + (row - pane.scroll) as u16,
            ));
        }
    }

    let lines: Vec<Line> = views
        .iter()
        .flat_map(|view| block_lines(view, surface.tab_width))
        .skip(pane.scroll)
        .take(height)
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn block_lines(view: &BlockView, tab_width: usize) -> Vec<Line<'static>> {
    let chars: Vec<char> = view.text.chars().collect();
    let styles = if view.editing {
        vec![Style::default(); chars.len()]
    } else {
        char_styles(&view.text)
    };
    let bullet_style = if view.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    view.lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            let gutter = if row == 0 { "• " } else { "  " };
            let mut spans = vec![Span::styled(gutter, bullet_style)];
            let mut run = String::new();
            let mut run_style = Style::default();
            for offset in line.start..line.end.min(chars.len()) {
                let c = chars[offset];
                if c == '\n' {
                    continue;
                }
                if styles[offset] != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = styles[offset];
                if c == '\t' {
                    run.push_str(&" ".repeat(tab_width));
                } else {
                    run.push(c);
                }
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            Line::from(spans)
        })
        .collect()
}

/// Display style of each char of a rendered block's text.
fn char_styles(text: &str) -> Vec<Style> {
    let starts: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    let mut styles = vec![Style::default(); starts.len()];
    let mut paint = |span: TextSpan, style: Style| {
        for (i, &byte) in starts.iter().enumerate() {
            if span.contains(byte) {
                styles[i] = style;
            }
        }
    };

    let underlined = Modifier::UNDERLINED;
    for url in find_urls(text) {
        paint(url, Style::default().fg(Color::Blue).add_modifier(underlined));
    }
    for node in parse_inline(text) {
        match node {
            InlineNode::WikiLink { full, .. } => {
                paint(full, Style::default().fg(Color::Cyan).add_modifier(underlined));
            }
            InlineNode::CodeSpan { full, .. } => {
                paint(full, Style::default().fg(Color::Yellow));
            }
            InlineNode::Text(_) => {}
        }
    }
    styles
}
