//! Form XObjects: content drawn once and placed any number of times.
//!
//! The half-page planner draws a week into a form and places it on both halves of the sheet.
//! Form XObjects use PDF's coordinate system where (0, 0) is at the bottom-left; placed
//! without a transform, the form's origin aligns with the page origin.

use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::page::{write_resources, PageContents, SpanLayout};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Pdf};

/// A reusable content container that can be placed on pages with transformations.
///
/// ```
/// use givesheet::{Document, Page, FormXObject, FormXObjectLayout, Transform, Pt};
/// use givesheet::pagesize;
///
/// let mut doc = Document::default();
/// let form = FormXObject::new(Pt(144.0), Pt(144.0));
/// let form_id = doc.add_form_xobject(form);
///
/// let mut page = Page::new(pagesize::LETTER, None);
/// page.add_form_xobject(FormXObjectLayout {
///     xobj_id: form_id,
///     transform: Transform::translate(Pt(72.0), Pt(72.0)),
/// });
/// doc.add_page(page);
/// ```
#[derive(Debug)]
pub struct FormXObject {
    /// Bounding box of the form content
    pub bbox: Rect,
    /// Content to render (same types as Page)
    pub contents: Vec<PageContents>,
}

impl FormXObject {
    /// Create a new Form XObject with the given dimensions
    pub fn new(width: Pt, height: Pt) -> Self {
        FormXObject {
            bbox: Rect::from_origin(Pt(0.0), Pt(0.0), width, height),
            contents: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_content(&mut self, content: Content) {
        self.contents
            .push(PageContents::RawContent(content.finish().to_vec()));
    }

    /// Every span of text in the form
    pub(crate) fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Write this Form XObject using its pre-generated ref, so that forms may refer to each
    /// other regardless of order.
    pub(crate) fn write(
        &self,
        refs: &ObjectReferences,
        xobj_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        all_form_xobjects: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let xobj_ref = refs.require(RefType::FormXObject(xobj_index))?;

        let rendered = render_contents(&self.contents, fonts);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );

        let mut xobj = writer.form_xobject(xobj_ref, &compressed);
        xobj.filter(pdf_writer::Filter::FlateDecode);
        xobj.bbox(self.bbox.into());
        let mut resources = xobj.resources();
        let written = write_resources(&mut resources, refs, fonts, images, all_form_xobjects);
        resources.finish();
        xobj.finish();
        written
    }
}

/// Where to place a Form XObject on a page
#[derive(Debug)]
pub struct FormXObjectLayout {
    /// The Form XObject to place (obtained from [`Document::add_form_xobject`](crate::Document::add_form_xobject))
    pub xobj_id: Id<FormXObject>,
    /// Transformation matrix applied when rendering this placement
    pub transform: Transform,
}
