//! Top-level event dispatch.
//!
//! The controller holds only wiring: the surface used for measurement, the
//! markup converter and the host hooks. The [`Document`] it edits is passed
//! in on every call.

use crate::caret::{CaretReconciler, DEFAULT_SEARCH_RADIUS, Direction};
use crate::editing::{CaretRequest, Document, Transition};
use crate::layout::{Point, TextSurface};
use crate::markup::{MarkupConverter, link_at, page_title};

/// Keys the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Character(char),
    Other,
}

/// Whether the editor consumed a key.
///
/// `Ignored` tells the host to apply the input element's default behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(self) -> bool {
        self == KeyOutcome::Handled
    }
}

/// Result of a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// The block entered editing; its caret placement is pending.
    Activated(usize),
    /// A cross-reference was followed. Propagation stops here.
    Navigated,
    Ignored,
}

/// A pointer press on a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub index: usize,
    /// Relative to the block's top-left corner.
    pub point: Point,
    pub shift: bool,
    /// The document is shown in the side panel.
    pub in_side_panel: bool,
}

/// A press on a cross-reference element the host has located itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPress {
    pub element_text: String,
    pub shift: bool,
    pub in_side_panel: bool,
}

/// Services the editor needs from its host.
pub trait EditorHooks {
    /// Durably save the document; called whenever a block leaves editing.
    fn persist(&mut self, document: &Document);

    /// Open another page, in the side panel or the main view.
    fn navigate_to(&mut self, title: &str, open_in_panel: bool);

    /// Fit the input element's height to its content.
    fn resize_to_fit(&mut self, _index: usize, _text: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Width every block is laid out at, in surface units.
    pub width: f32,
    pub search_radius: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            width: 80.0,
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }
}

pub struct EditorController<S, M, H> {
    surface: S,
    markup: M,
    hooks: H,
    settings: ControllerSettings,
}

impl<S: TextSurface, M: MarkupConverter, H: EditorHooks> EditorController<S, M, H> {
    pub fn new(surface: S, markup: M, hooks: H) -> Self {
        Self {
            surface,
            markup,
            hooks,
            settings: ControllerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn set_width(&mut self, width: f32) {
        self.settings.width = width;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn markup(&self) -> &M {
        &self.markup
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    fn reconciler(&self) -> CaretReconciler<'_, S> {
        CaretReconciler::new(&self.surface, self.settings.width)
            .with_search_radius(self.settings.search_radius)
    }

    /// Dispatches a key pressed in the active block.
    ///
    /// A placement still pending from the previous event is completed first.
    pub fn handle_key(&mut self, doc: &mut Document, key: Key) -> KeyOutcome {
        self.on_mounted(doc);
        if doc.active().is_none() {
            return KeyOutcome::Ignored;
        }

        let outcome = match key {
            Key::Enter => self.split(doc),
            Key::Backspace => self.merge_backward(doc),
            Key::Delete => self.merge_forward(doc),
            Key::Tab => self.insert_tab(doc),
            Key::ArrowUp => self.navigate(doc, Direction::Up),
            Key::ArrowDown => self.navigate(doc, Direction::Down),
            Key::ArrowLeft => self.navigate(doc, Direction::Left),
            Key::ArrowRight => self.navigate(doc, Direction::Right),
            Key::Character(_) | Key::Other => KeyOutcome::Ignored,
        };
        log::trace!("{key:?} -> {outcome:?}");
        outcome
    }

    /// Second phase of entering edit: the input element is attached and can
    /// be measured, so the caret is placed for real.
    ///
    /// Returns the final caret, or `None` when nothing was pending.
    pub fn on_mounted(&mut self, doc: &mut Document) -> Option<usize> {
        let index = doc.active_index()?;
        let editor = doc.active_mut()?;
        let pending = editor.take_pending()?;
        let caret = self.reconciler().place(editor.text(), pending);
        editor.set_caret(caret);
        log::debug!("block {index}: caret placed at {caret}");
        self.hooks.resize_to_fit(index, editor.text());
        Some(caret)
    }

    /// Pointer press on a block.
    ///
    /// On a rendered block a cross-reference under the pointer is followed;
    /// otherwise the block enters editing at the pressed offset. Presses on
    /// the editing block are left to the input element.
    pub fn on_pointer_down(&mut self, doc: &mut Document, press: PointerPress) -> PointerOutcome {
        let Some(block) = doc.block(press.index) else {
            return PointerOutcome::Ignored;
        };
        if block.is_editing() {
            return PointerOutcome::Ignored;
        }

        let text = block.raw_text(&self.markup).into_owned();
        let offset = self
            .surface
            .offset_at(&text, self.settings.width, press.point);
        if let Some(link) = link_at(&text, offset) {
            return self.on_link_pressed(&LinkPress {
                element_text: link.element_text,
                shift: press.shift,
                in_side_panel: press.in_side_panel,
            });
        }

        match doc.begin_edit(press.index, CaretRequest::At(offset), None, &self.markup) {
            Some(transition) => {
                self.settle(doc, transition);
                PointerOutcome::Activated(press.index)
            }
            None => PointerOutcome::Ignored,
        }
    }

    /// Follows a cross-reference instead of the element's default action.
    ///
    /// Shift opens the page in the side panel, unless the link already
    /// lives there.
    pub fn on_link_pressed(&mut self, press: &LinkPress) -> PointerOutcome {
        let title = page_title(&press.element_text);
        let open_in_panel = press.shift && !press.in_side_panel;
        log::debug!("navigating to {title:?} (panel: {open_in_panel})");
        self.hooks.navigate_to(&title, open_in_panel);
        PointerOutcome::Navigated
    }

    /// The active block lost focus: render it and persist.
    pub fn on_blur(&mut self, doc: &mut Document) -> Option<usize> {
        let index = doc.end_edit(&self.markup)?;
        self.hooks.persist(doc);
        Some(index)
    }

    fn settle(&mut self, doc: &Document, transition: Transition) {
        if transition.blurred.is_some() {
            self.hooks.persist(doc);
        }
    }

    fn split(&mut self, doc: &mut Document) -> KeyOutcome {
        let Some(transition) = doc.split_active(&self.markup) else {
            return KeyOutcome::Ignored;
        };
        self.settle(doc, transition);
        if let Some(editor) = doc.active() {
            self.hooks.resize_to_fit(transition.focused, editor.text());
        }
        KeyOutcome::Handled
    }

    fn insert_tab(&mut self, doc: &mut Document) -> KeyOutcome {
        doc.insert_tab();
        if let (Some(index), Some(editor)) = (doc.active_index(), doc.active()) {
            self.hooks.resize_to_fit(index, editor.text());
        }
        KeyOutcome::Handled
    }

    fn merge_backward(&mut self, doc: &mut Document) -> KeyOutcome {
        match doc.merge_into_previous(&self.markup) {
            Some(transition) => {
                self.settle(doc, transition);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }

    fn merge_forward(&mut self, doc: &mut Document) -> KeyOutcome {
        let Some(index) = doc.merge_next_into_active(&self.markup) else {
            return KeyOutcome::Ignored;
        };
        if let Some(editor) = doc.active() {
            self.hooks.resize_to_fit(index, editor.text());
        }
        KeyOutcome::Handled
    }

    fn navigate(&mut self, doc: &mut Document, direction: Direction) -> KeyOutcome {
        let Some(planned) = self.reconciler().plan(doc, &self.markup, direction) else {
            return KeyOutcome::Ignored;
        };
        match doc.begin_edit(planned.target, planned.request, planned.anchor_x, &self.markup) {
            Some(transition) => {
                self.settle(doc, transition);
                KeyOutcome::Handled
            }
            None => KeyOutcome::Ignored,
        }
    }
}
