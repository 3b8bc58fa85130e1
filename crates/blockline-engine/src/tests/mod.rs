//! Shared helpers for unit tests.

use crate::Document;
use crate::controller::EditorHooks;
use crate::markup::HtmlMarkup;

/// Hooks that remember every call.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    /// Raw texts of the document at each persist.
    pub persisted: Vec<Vec<String>>,
    pub navigations: Vec<(String, bool)>,
    pub resized: Vec<(usize, String)>,
}

impl EditorHooks for RecordingHooks {
    fn persist(&mut self, document: &Document) {
        self.persisted.push(document.raw_texts(&HtmlMarkup));
    }

    fn navigate_to(&mut self, title: &str, open_in_panel: bool) {
        self.navigations.push((title.to_string(), open_in_panel));
    }

    fn resize_to_fit(&mut self, index: usize, text: &str) {
        self.resized.push((index, text.to_string()));
    }
}

pub fn create_test_pages_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}
