//! Fillable text fields.
//!
//! Field names must be unique within a document. Rather than keeping a global counter, callers
//! hold a [FieldNamer] for the document they are building and pass it to whatever lays out
//! fields.

use crate::rect::Rect;
use crate::units::Pt;
use pdf_writer::types::{AnnotationFlags, FieldType};
use pdf_writer::{Pdf, Ref, Str, TextStr};

/// Resource name of the font viewers type field contents in
pub(crate) const FIELD_FONT: &[u8] = b"Helv";

/// Issues unique field names, `prefix0`, `prefix1`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNamer {
    prefix: String,
    next: usize,
}

impl FieldNamer {
    pub fn new<S: ToString>(prefix: S) -> FieldNamer {
        FieldNamer {
            prefix: prefix.to_string(),
            next: 0,
        }
    }

    /// A name that this namer has never handed out before
    pub fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        name
    }

    /// How many names have been handed out so far
    pub fn issued(&self) -> usize {
        self.next
    }
}

impl Default for FieldNamer {
    fn default() -> Self {
        FieldNamer::new("field")
    }
}

/// A single-line fillable text box on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub name: String,
    pub rect: Rect,
    pub font_size: Pt,
    /// Shown by viewers when hovering the field
    pub tooltip: Option<String>,
}

impl TextField {
    pub(crate) fn write(&self, field_ref: Ref, page_ref: Ref, writer: &mut Pdf) {
        let appearance = format!(
            "/{} {} Tf 0 g",
            String::from_utf8_lossy(FIELD_FONT),
            self.font_size
        );

        let mut field = writer.form_field(field_ref);
        field.partial_name(TextStr(&self.name));
        field.field_type(FieldType::Text);
        field.vartext_default_appearance(Str(appearance.as_bytes()));
        if let Some(tooltip) = &self.tooltip {
            field.alternate_name(TextStr(tooltip));
        }

        let mut annotation = field.into_annotation();
        annotation.rect(self.rect.into());
        annotation.page(page_ref);
        annotation.flags(AnnotationFlags::PRINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_per_namer() {
        let mut namer = FieldNamer::new("week");
        assert_eq!(namer.next_name(), "week0");
        assert_eq!(namer.next_name(), "week1");
        assert_eq!(namer.issued(), 2);

        let mut other = FieldNamer::default();
        assert_eq!(other.next_name(), "field0");
    }
}
