//! Query text buffer and its three mutation primitives.
//!
//! Positions are character offsets, not byte offsets. Every edit is a pure
//! transformation of the previous text and reports where the caret goes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caret or selection range within the buffer text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Collapsed selection.
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Fit the selection to a text of `len` characters. A selection reaching
    /// past the end is stale as a whole and collapses to a caret at the end.
    pub fn clamp(self, len: usize) -> Self {
        if self.end > len {
            Self::caret(len)
        } else {
            self
        }
    }
}

/// Boolean connective applied to the whole buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Not,
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "AND"),
            Connective::Or => write!(f, "OR"),
            Connective::Not => write!(f, "NOT"),
        }
    }
}

/// What the host should do with its caret after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretUpdate {
    /// Leave the caret where the surface has it.
    Keep,
    /// Apply right away.
    Now(Selection),
    /// Apply once the new text has been rendered.
    AfterRender(Selection),
}

/// The query text plus the last known selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    text: String,
    selection: Selection,
}

impl QueryBuffer {
    /// Seed a buffer from saved text, caret at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        Self {
            text,
            selection: Selection::caret(end),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text after the user typed in the surface.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = self.selection.clamp(self.len());
    }

    /// Track a selection reported by the surface. A selection reaching past
    /// the text collapses to a caret at the end.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.len();
        if selection.end > len {
            tracing::warn!(
                start = selection.start,
                end = selection.end,
                len,
                "stale selection clamped to end of text"
            );
        }
        self.selection = Selection::new(selection.start, selection.end).clamp(len);
    }

    /// Splice a fragment in place of the selection: `before + " " + fragment + " " + after`.
    ///
    /// The caret lands right after the fragment.
    pub fn insert_fragment(&mut self, fragment: &str) -> CaretUpdate {
        let Selection { start, end } = self.selection.clamp(self.len());
        let before: String = self.text.chars().take(start).collect();
        let after: String = self.text.chars().skip(end).collect();

        self.text = format!("{} {} {}", before, fragment, after);
        let caret = start + 1 + fragment.chars().count();
        self.selection = Selection::caret(caret);

        tracing::trace!(start, end, caret, "fragment inserted");
        CaretUpdate::Now(self.selection)
    }

    /// `NOT (text)`. The caret is left alone.
    pub fn wrap_not(&mut self) -> CaretUpdate {
        self.text = format!("NOT ({})", self.text);
        self.selection = self.selection.clamp(self.len());
        CaretUpdate::Keep
    }

    /// `(text) AND ()` / `(text) OR ()`, caret between the new parentheses.
    ///
    /// `Connective::Not` falls back to [`QueryBuffer::wrap_not`].
    pub fn wrap_boolean(&mut self, connective: Connective) -> CaretUpdate {
        if connective == Connective::Not {
            return self.wrap_not();
        }
        self.text = format!("({}) {} ()", self.text, connective);
        self.selection = Selection::caret(self.len() - 1);
        CaretUpdate::AfterRender(self.selection)
    }

    /// Reset to the empty string.
    pub fn clear(&mut self) -> CaretUpdate {
        self.text.clear();
        self.selection = Selection::default();
        CaretUpdate::Now(self.selection)
    }
}
