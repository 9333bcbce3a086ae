use crate::{
    font::Font,
    form_xobject::FormXObject,
    image::Image,
    info::Info,
    page::{Page, SpanLayout},
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf, Ref, Str};
use std::{
    collections::{BTreeSet, HashMap},
    io::Write,
};

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub form_xobjects: Arena<FormXObject>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Get the 0-based index of a page given its ID
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|p| *p == page)
    }

    /// Add a font to the document. Fonts are shared by every page and form in the document.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document. Images are shared by every page and form in the document.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a Form XObject to the document. The returned id places it on pages.
    pub fn add_form_xobject(&mut self, form: FormXObject) -> Id<FormXObject> {
        self.form_xobjects.alloc(form)
    }

    /// Write the entire document to the writer. The document is rendered in memory first.
    ///
    /// Until `write` is called no references are resolved, so pages, fonts and images can be
    /// edited freely. If any page carries form fields an interactive form is written too, with
    /// Helvetica as the font viewers type into the fields with.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
            form_xobjects,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not arena index
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        let mut ordered_pages = Vec::with_capacity(page_order.len());
        for (page_index, id) in page_order.iter().enumerate() {
            ordered_pages.push(pages.get(*id).ok_or(PDFError::PageMissing(page_index))?);
        }

        let mut field_refs = Vec::new();
        for (page_index, page) in ordered_pages.iter().enumerate() {
            for field_index in 0..page.fields.len() {
                field_refs.push(refs.gen(RefType::Field(page_index, field_index)));
            }
        }

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        let used = used_chars(
            ordered_pages.iter().copied().flat_map(Page::spans),
            form_xobjects.iter().flat_map(|(_, form)| form.spans()),
        );
        for (id, font) in fonts.iter() {
            let chars = used.get(&id.index()).into_iter().flatten();
            font.write(&mut refs, id, chars, &mut writer);
        }

        for (i, image) in images.iter() {
            image.write(&mut refs, i.index(), &mut writer);
        }

        // every form gets its ref before any is written so forms can place each other
        for (i, _) in form_xobjects.iter() {
            refs.gen(RefType::FormXObject(i.index()));
        }
        for (i, xobj) in form_xobjects.iter() {
            xobj.write(
                &refs,
                i.index(),
                &fonts,
                &images,
                &form_xobjects,
                &mut writer,
            )?;
        }

        for (page_index, page) in ordered_pages.iter().enumerate() {
            page.write(
                &mut refs,
                page_index,
                &fonts,
                &images,
                &form_xobjects,
                &mut writer,
            )?;
        }

        let field_font_id = if field_refs.is_empty() {
            None
        } else {
            let id = refs.gen(RefType::FieldFont);
            writer
                .type1_font(id)
                .base_font(Name(b"Helvetica"))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            Some(id)
        };

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(field_font_id) = field_font_id {
            log::debug!("writing interactive form with {} fields", field_refs.len());
            let mut form = catalog.form();
            form.fields(field_refs);
            form.pair(Name(b"NeedAppearances"), true);
            form.default_resources()
                .fonts()
                .pair(Name(crate::form::FIELD_FONT), field_font_id);
            let appearance = format!(
                "/{} 0 Tf 0 g",
                String::from_utf8_lossy(crate::form::FIELD_FONT)
            );
            form.default_appearance(Str(appearance.as_bytes()));
            form.finish();
        }
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

/// Every character drawn with each font, keyed by font index
fn used_chars<'s>(
    page_spans: impl Iterator<Item = &'s SpanLayout>,
    form_spans: impl Iterator<Item = &'s SpanLayout>,
) -> HashMap<usize, BTreeSet<char>> {
    let mut used: HashMap<usize, BTreeSet<char>> = HashMap::new();
    for span in page_spans.chain(form_spans) {
        used.entry(span.font.id.index())
            .or_default()
            .extend(span.text.chars());
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TextField;
    use crate::pagesize::LETTER;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn render(doc: Document) -> Vec<u8> {
        let mut out = Vec::new();
        doc.write(&mut out).expect("can write document");
        out
    }

    #[test]
    fn empty_document_is_still_a_pdf() {
        let out = render(Document::default());
        assert!(out.starts_with(b"%PDF-"));
    }

    #[test]
    fn pages_are_written_in_order() {
        let mut doc = Document::default();
        let first = doc.add_page(Page::new(LETTER, None));
        let second = doc.add_page(Page::new(LETTER, None));
        assert_eq!(doc.index_of_page(first), Some(0));
        assert_eq!(doc.index_of_page(second), Some(1));

        let out = render(doc);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn fields_produce_an_interactive_form() {
        let mut doc = Document::default();
        let mut page = Page::new(LETTER, None);
        page.add_field(TextField {
            name: "week0".to_string(),
            rect: Rect::from_origin(Pt(72.0), Pt(72.0), Pt(100.0), Pt(24.0)),
            font_size: Pt(12.0),
            tooltip: None,
        });
        doc.add_page(page);

        let out = render(doc);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/AcroForm"));
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("(week0)"));
        assert!(text.contains("/NeedAppearances true"));
    }

    #[test]
    fn no_form_without_fields() {
        let mut doc = Document::default();
        doc.add_page(Page::new(LETTER, None));
        let text = String::from_utf8_lossy(&render(doc)).into_owned();
        assert!(!text.contains("/AcroForm"));
    }
}
