use anyhow::Result;
use blockline_config::EditorConfig;
use blockline_engine::{
    CaretRequest, ControllerSettings, Document, EditorController, EditorHooks, HtmlMarkup, Key,
    MonospaceSurface, PointerOutcome, PointerPress, io,
};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::path::PathBuf;

use crate::native;
use crate::view::{self, GUTTER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Main,
    Side,
}

/// A page shown in the main view or the side panel.
pub struct Pane {
    pub title: String,
    pub document: Document,
    /// First page row on screen.
    pub scroll: usize,
    /// Text area inside the border, set on every draw.
    pub area: Rect,
}

impl Pane {
    fn new(title: &str, document: Document) -> Self {
        Self {
            title: title.to_string(),
            document,
            scroll: 0,
            area: Rect::default(),
        }
    }

    /// Columns available to block text.
    pub fn text_width(&self) -> u16 {
        self.area.width.saturating_sub(GUTTER).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub title: String,
    pub open_in_panel: bool,
}

/// Saves pages to disk and queues navigation for the app to act on.
pub struct FileHooks {
    pages_path: PathBuf,
    /// Title of the page the next persist belongs to.
    page: String,
    navigation: Option<Navigation>,
    error: Option<String>,
}

impl EditorHooks for FileHooks {
    fn persist(&mut self, document: &Document) {
        match io::save_document(&self.page, &self.pages_path, document, &HtmlMarkup) {
            Ok(()) => self.error = None,
            Err(e) => {
                log::warn!("Failed to save page {:?}: {e}", self.page);
                self.error = Some(format!("Failed to save {}: {e}", self.page));
            }
        }
    }

    fn navigate_to(&mut self, title: &str, open_in_panel: bool) {
        self.navigation = Some(Navigation {
            title: title.to_string(),
            open_in_panel,
        });
    }
}

pub type Controller = EditorController<MonospaceSurface, HtmlMarkup, FileHooks>;

pub struct App {
    pub controller: Controller,
    pub main: Pane,
    pub side: Option<Pane>,
    pub focus: PaneId,
    pub should_quit: bool,
    status: Option<String>,
}

impl App {
    pub fn new(pages_path: PathBuf, page: &str, editor: &EditorConfig) -> Result<Self> {
        let document = io::load_document(page, &pages_path, &HtmlMarkup)?;
        let surface = MonospaceSurface::default().with_tab_width(editor.tab_width);
        let hooks = FileHooks {
            pages_path,
            page: page.to_string(),
            navigation: None,
            error: None,
        };
        let controller = EditorController::new(surface, HtmlMarkup, hooks).with_settings(
            ControllerSettings {
                search_radius: editor.caret_search_radius,
                ..ControllerSettings::default()
            },
        );

        Ok(Self {
            controller,
            main: Pane::new(page, document),
            side: None,
            focus: PaneId::Main,
            should_quit: false,
            status: None,
        })
    }

    /// Message for the status line, most recent problem first.
    pub fn status(&self) -> Option<String> {
        self.controller
            .hooks()
            .error
            .clone()
            .or_else(|| self.status.clone())
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        match id {
            PaneId::Main => Some(&self.main),
            PaneId::Side => self.side.as_ref(),
        }
    }

    /// The controller pointed at pane `id`, with the pane itself.
    fn target(&mut self, id: PaneId) -> Option<(&mut Controller, &mut Pane)> {
        let pane = match id {
            PaneId::Main => &mut self.main,
            PaneId::Side => self.side.as_mut()?,
        };
        let controller = &mut self.controller;
        controller.hooks_mut().page = pane.title.clone();
        controller.set_width(f32::from(pane.text_width()));
        Some((controller, pane))
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('w') if ctrl => self.close_side_panel(),
            KeyCode::Esc => self.blur(self.focus),
            _ => self.edit_key(event),
        }
    }

    fn edit_key(&mut self, event: KeyEvent) {
        let Some((controller, pane)) = self.target(self.focus) else {
            return;
        };

        if pane.document.active().is_none() {
            // Nothing focused yet: Enter or an arrow starts editing
            let index = match event.code {
                KeyCode::Enter | KeyCode::Down => 0,
                KeyCode::Up => pane.document.len().saturating_sub(1),
                _ => return,
            };
            pane.document
                .begin_edit(index, CaretRequest::End, None, controller.markup());
            return;
        }

        if controller
            .handle_key(&mut pane.document, editor_key(&event))
            .is_handled()
        {
            return;
        }

        let width = controller.settings().width;
        if let Some(editor) = pane.document.active_mut() {
            native::apply_key(controller.surface(), width, editor, &event);
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(event),
            MouseEventKind::ScrollDown => self.scroll(event, true),
            MouseEventKind::ScrollUp => self.scroll(event, false),
            _ => {}
        }
    }

    fn click(&mut self, event: MouseEvent) {
        let Some(id) = self.pane_at(event.column, event.row) else {
            return;
        };
        if id != self.focus {
            self.blur(self.focus);
            self.focus = id;
        }

        let Some((controller, pane)) = self.target(id) else {
            return;
        };
        let width = controller.settings().width;
        let views = view::layout_blocks(
            &pane.document,
            controller.markup(),
            controller.surface(),
            width,
        );
        let Some((index, point)) =
            view::hit_test(&views, pane.area, pane.scroll, event.column, event.row)
        else {
            return;
        };

        // Many terminals keep Shift-click for their own selection, so Alt works too
        let shift = event
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);
        let press = PointerPress {
            index,
            point,
            shift,
            in_side_panel: id == PaneId::Side,
        };
        match controller.on_pointer_down(&mut pane.document, press) {
            PointerOutcome::Ignored => {
                if let Some(editor) = pane.document.active_mut() {
                    native::click(controller.surface(), width, editor, point);
                }
            }
            PointerOutcome::Navigated => self.follow_navigation(),
            PointerOutcome::Activated(_) => {}
        }
    }

    fn scroll(&mut self, event: MouseEvent, down: bool) {
        let Some(id) = self.pane_at(event.column, event.row) else {
            return;
        };
        let pane = match id {
            PaneId::Main => &mut self.main,
            PaneId::Side => match self.side.as_mut() {
                Some(side) => side,
                None => return,
            },
        };
        pane.scroll = if down {
            pane.scroll + 1
        } else {
            pane.scroll.saturating_sub(1)
        };
    }

    fn pane_at(&self, column: u16, row: u16) -> Option<PaneId> {
        let position = ratatui::layout::Position::new(column, row);
        [PaneId::Main, PaneId::Side]
            .into_iter()
            .find(|&id| self.pane(id).is_some_and(|pane| pane.area.contains(position)))
    }

    /// Completes a pending caret placement once the active block has been
    /// drawn. Returns whether anything was placed.
    pub fn place_pending_caret(&mut self) -> bool {
        let Some((controller, pane)) = self.target(self.focus) else {
            return false;
        };
        controller.on_mounted(&mut pane.document).is_some()
    }

    pub fn blur(&mut self, id: PaneId) {
        if let Some((controller, pane)) = self.target(id) {
            controller.on_blur(&mut pane.document);
        }
    }

    fn blur_all(&mut self) {
        self.blur(PaneId::Main);
        self.blur(PaneId::Side);
    }

    pub fn quit(&mut self) {
        self.blur_all();
        self.should_quit = true;
    }

    pub fn close_side_panel(&mut self) {
        self.blur(PaneId::Side);
        self.side = None;
        self.focus = PaneId::Main;
    }

    fn follow_navigation(&mut self) {
        let Some(navigation) = self.controller.hooks_mut().navigation.take() else {
            return;
        };
        if let Err(e) = self.open_page(&navigation.title, navigation.open_in_panel) {
            log::warn!("Failed to open page {:?}: {e}", navigation.title);
            self.status = Some(format!("Failed to open {}: {e}", navigation.title));
        }
    }

    pub fn open_page(&mut self, title: &str, in_panel: bool) -> Result<()> {
        self.blur_all();
        let pages_path = self.controller.hooks().pages_path.clone();
        let document = io::load_document(title, &pages_path, &HtmlMarkup)?;
        let pane = Pane::new(title, document);
        if in_panel {
            self.side = Some(pane);
            self.focus = PaneId::Side;
        } else {
            self.main = pane;
            self.focus = PaneId::Main;
        }
        self.status = None;
        log::info!("Opened page {title:?} (panel: {in_panel})");
        Ok(())
    }
}

/// The editor's view of a terminal key.
pub fn editor_key(event: &KeyEvent) -> Key {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Key::Other;
    }
    match event.code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Char(c) => Key::Character(c),
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn app_with(content: &str) -> (TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.md"), content).unwrap();
        let mut app = App::new(dir.path().to_path_buf(), "index", &EditorConfig::default()).unwrap();
        app.main.area = Rect::new(1, 1, 22, 10);
        (dir, app)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click_at(column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }
    }

    fn texts(pane: &Pane) -> Vec<String> {
        pane.document.raw_texts(&HtmlMarkup)
    }

    #[rstest]
    #[case(KeyCode::Enter, Key::Enter)]
    #[case(KeyCode::Up, Key::ArrowUp)]
    #[case(KeyCode::Char('x'), Key::Character('x'))]
    #[case(KeyCode::Home, Key::Other)]
    fn terminal_keys_map_to_editor_keys(#[case] code: KeyCode, #[case] expected: Key) {
        assert_eq!(editor_key(&key(code)), expected);
    }

    #[test]
    fn control_chords_are_not_editor_keys() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(editor_key(&event), Key::Other);
    }

    #[test]
    fn missing_page_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(dir.path().to_path_buf(), "fresh", &EditorConfig::default()).unwrap();
        assert_eq!(texts(&app.main), vec![""]);
    }

    #[test]
    fn typing_then_escape_saves_the_page() {
        // Given the second block clicked at its start
        let (dir, mut app) = app_with("first\nsecond\n");
        app.handle_mouse(click_at(3, 2, KeyModifiers::NONE));
        assert!(app.place_pending_caret());
        assert_eq!(app.main.document.active_index(), Some(1));

        // When typing and leaving the block
        app.handle_key(key(KeyCode::Char('>')));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Esc));

        // Then the page on disk has the edit
        assert_eq!(app.main.document.editing_count(), 0);
        let saved = fs::read_to_string(dir.path().join("index.md")).unwrap();
        assert_eq!(saved, "first\n> second\n");
    }

    #[test]
    fn enter_splits_through_the_controller() {
        let (_dir, mut app) = app_with("hello world\n");
        app.handle_mouse(click_at(8, 1, KeyModifiers::NONE));
        app.place_pending_caret();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(texts(&app.main), vec!["hello", " world"]);
        assert_eq!(app.main.document.active_index(), Some(1));
    }

    #[test]
    fn enter_without_focus_starts_editing_the_first_block() {
        let (_dir, mut app) = app_with("abc\ndef\n");
        app.handle_key(key(KeyCode::Enter));
        app.place_pending_caret();
        let editor = app.main.document.active().unwrap();
        assert_eq!(app.main.document.active_index(), Some(0));
        assert_eq!(editor.caret(), 3);
    }

    #[test]
    fn clicking_a_link_opens_the_page() {
        let (dir, mut app) = app_with("see [[Other]]\n");
        fs::write(dir.path().join("Other.md"), "elsewhere\n").unwrap();

        app.handle_mouse(click_at(9, 1, KeyModifiers::NONE));

        assert_eq!(app.main.title, "Other");
        assert_eq!(texts(&app.main), vec!["elsewhere"]);
        assert!(app.side.is_none());
    }

    #[test]
    fn shift_click_opens_the_side_panel() {
        let (_dir, mut app) = app_with("see [[Other]]\n");

        app.handle_mouse(click_at(9, 1, KeyModifiers::SHIFT));

        assert_eq!(app.main.title, "index");
        assert_eq!(app.side.as_ref().map(|p| p.title.as_str()), Some("Other"));
        assert_eq!(app.focus, PaneId::Side);

        app.close_side_panel();
        assert!(app.side.is_none());
        assert_eq!(app.focus, PaneId::Main);
    }

    #[test]
    fn quitting_saves_the_active_block() {
        let (dir, mut app) = app_with("abc\n");
        app.handle_mouse(click_at(6, 1, KeyModifiers::NONE));
        app.place_pending_caret();
        app.handle_key(key(KeyCode::Char('d')));

        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));

        assert!(app.should_quit);
        let saved = fs::read_to_string(dir.path().join("index.md")).unwrap();
        assert_eq!(saved, "abcd\n");
    }
}
