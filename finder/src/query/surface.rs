//! Bridge between the buffer and the host's editable text widget.
//!
//! Caret placement after a boolean wrap can only happen once the widget has
//! rendered the new text, so [`Editor`] keeps it pending until the host calls
//! [`Editor::after_render`].

use super::buffer::{CaretUpdate, Connective, QueryBuffer, Selection};

/// The host's editable text widget.
pub trait TextSurface {
    /// Current selection, or `None` when the widget lost track of it.
    fn selection(&self) -> Option<Selection>;
    fn set_selection(&mut self, selection: Selection);
    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);
    fn focus(&mut self) {}
}

/// In-memory surface for hosts without a widget (CLI, tests).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub text: String,
    pub selection: Option<Selection>,
    pub focused: bool,
}

impl TextSurface for HeadlessSurface {
    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

/// A buffer bound to a surface.
#[derive(Debug)]
pub struct Editor<S> {
    buffer: QueryBuffer,
    surface: S,
    pending: Option<Selection>,
}

impl<S: TextSurface> Editor<S> {
    pub fn new(text: impl Into<String>, mut surface: S) -> Self {
        let buffer = QueryBuffer::new(text);
        surface.set_text(buffer.text());
        surface.set_selection(buffer.selection());
        Self {
            buffer,
            surface,
            pending: None,
        }
    }

    pub fn buffer(&self) -> &QueryBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether a caret placement is waiting for the next render.
    pub fn has_pending_caret(&self) -> bool {
        self.pending.is_some()
    }

    /// The user typed: adopt the new text and the surface's selection.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.buffer.set_text(text);
        self.surface.set_text(self.buffer.text());
        self.pending = None;
        self.sync_selection();
    }

    /// The user moved the caret.
    pub fn select(&mut self, selection: Selection) {
        self.surface.set_selection(selection);
        self.buffer.set_selection(selection);
    }

    pub fn insert_fragment(&mut self, fragment: &str) -> Selection {
        self.sync_selection();
        let update = self.buffer.insert_fragment(fragment);
        self.apply(update);
        self.buffer.selection()
    }

    pub fn wrap(&mut self, connective: Connective) {
        self.sync_selection();
        let update = self.buffer.wrap_boolean(connective);
        self.apply(update);
    }

    pub fn clear(&mut self) {
        let update = self.buffer.clear();
        self.apply(update);
    }

    /// Apply any caret placement deferred until the text was rendered.
    pub fn after_render(&mut self) {
        if let Some(selection) = self.pending.take() {
            self.surface.set_selection(selection);
            self.surface.focus();
        }
    }

    /// Pull the surface's selection into the buffer. A surface that lost
    /// track keeps the last known selection.
    fn sync_selection(&mut self) {
        if let Some(selection) = self.surface.selection() {
            self.buffer.set_selection(selection);
        }
    }

    fn apply(&mut self, update: CaretUpdate) {
        self.surface.set_text(self.buffer.text());
        self.pending = None;
        match update {
            CaretUpdate::Keep => {}
            CaretUpdate::Now(selection) => self.surface.set_selection(selection),
            CaretUpdate::AfterRender(selection) => self.pending = Some(selection),
        }
        self.surface.focus();
    }
}
