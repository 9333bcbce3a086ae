use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::form::TextField;
use crate::form_xobject::{FormXObject, FormXObjectLayout};
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Filter, Finish, Name, Pdf};

/// The font and size a span is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text with a single font and colour, positioned on its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Baseline start of the text
    pub coords: (Pt, Pt),
    /// Counter-clockwise rotation about `coords`, in radians
    pub angle: f32,
}

/// An image stretched over a rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

#[derive(Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    RawContent(Vec<u8>),
    FormXObject(FormXObjectLayout),
}

/// A single page of a document
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
    /// Fillable fields on the page
    pub fields: Vec<TextField>,
}

impl Page {
    /// Create a page of the given size. Without margins the content box covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Margins::empty().content_box(size),
            content_box: margins.content_box(size),
            contents: Vec::default(),
            fields: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Add drawing operations built with [pdf_writer::Content]
    pub fn add_content(&mut self, content: Content) {
        self.contents
            .push(PageContents::RawContent(content.finish().to_vec()));
    }

    pub fn add_form_xobject(&mut self, layout: FormXObjectLayout) {
        self.contents.push(PageContents::FormXObject(layout));
    }

    pub fn add_field(&mut self, field: TextField) {
        self.fields.push(field);
    }

    /// Every span of text on the page
    pub(crate) fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Write the page. Refs for the page itself and for each of its fields must already exist.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        form_xobjects: &Arena<FormXObject>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.require(RefType::Page(page_index))?;
        let parent = refs.require(RefType::PageTree)?;
        let field_refs = (0..self.fields.len())
            .map(|i| refs.require(RefType::Field(page_index, i)))
            .collect::<Result<Vec<_>, _>>()?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        write_resources(&mut page.resources(), refs, fonts, images, form_xobjects)?;
        page.contents(content_id);
        if !field_refs.is_empty() {
            page.annotations(field_refs.iter().copied());
        }
        page.finish();

        let rendered = render_contents(&self.contents, fonts);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(content_id, &compressed).filter(Filter::FlateDecode);

        for (field, field_ref) in self.fields.iter().zip(field_refs) {
            field.write(field_ref, id, writer);
        }

        Ok(())
    }
}

/// Every font, image and form XObject is available to every page and form
pub(crate) fn write_resources(
    resources: &mut pdf_writer::writers::Resources,
    refs: &ObjectReferences,
    fonts: &Arena<Font>,
    images: &Arena<Image>,
    form_xobjects: &Arena<FormXObject>,
) -> Result<(), PDFError> {
    let mut resource_fonts = resources.fonts();
    for (i, _) in fonts.iter() {
        resource_fonts.pair(
            Name(format!("F{}", i.index()).as_bytes()),
            refs.require(RefType::Font(i.index()))?,
        );
    }
    resource_fonts.finish();

    let mut resource_xobjects = resources.x_objects();
    for (i, _) in images.iter() {
        resource_xobjects.pair(
            Name(format!("I{}", i.index()).as_bytes()),
            refs.require(RefType::Image(i.index()))?,
        );
    }
    for (i, _) in form_xobjects.iter() {
        resource_xobjects.pair(
            Name(format!("X{}", i.index()).as_bytes()),
            refs.require(RefType::FormXObject(i.index()))?,
        );
    }
    resource_xobjects.finish();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::LETTER;

    #[test]
    fn margins_shape_the_content_box() {
        let page = Page::new(LETTER, Some(Margins::all(In(1.0))));
        assert_eq!(page.width(), Pt(612.0));
        assert_eq!(page.content_box.x1, Pt(72.0));
        assert_eq!(page.content_box.y2, Pt(720.0));

        let bare = Page::new(LETTER, None);
        assert_eq!(bare.content_box, bare.media_box);
    }
}
