use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A parsed TrueType or OpenType font used for template labels. The whole font file is embedded
/// in the generated PDF, but only the glyphs the document actually draws are described in its
/// width table and text extraction map.
///
/// Fonts are referred to from pages by the [Id] returned by
/// [`Document::add_font`](crate::Document::add_font).
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> f32 {
        *size / self.face().units_per_em() as f32
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        Pt(self.scaling(size) * self.face().ascender() as f32)
    }

    /// Distance from the baseline to the bottom of the font at the given size; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        Pt(self.scaling(size) * self.face().descender() as f32)
    }

    /// Height of capital letters above the baseline, falling back to the ascent for fonts that
    /// don't record it
    pub fn cap_height(&self, size: Pt) -> Pt {
        match self.face().capital_height() {
            Some(h) => Pt(self.scaling(size) * h as f32),
            None => self.ascent(size),
        }
    }

    /// Vertical distance between two consecutive baselines
    pub fn line_height(&self, size: Pt) -> Pt {
        let gap = Pt(self.scaling(size) * self.face().line_gap() as f32);
        gap + self.ascent(size) - self.descent(size)
    }

    /// Glyph used to draw `ch`, substituting the replacement character or `?` when the font
    /// lacks it
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face()
            .glyph_index(ch)
            .or_else(|| self.face().glyph_index('\u{FFFD}'))
            .or_else(|| self.face().glyph_index('?'))
            .map(|gid| gid.0)
    }

    /// Horizontal advance of a glyph at the given size
    pub fn advance(&self, gid: u16, size: Pt) -> Pt {
        let units = self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default();
        Pt(self.scaling(size) * units as f32)
    }

    /// Glyph ids for each of the characters, paired with the character they stand for
    fn glyphs_for<'c>(
        &self,
        used: impl IntoIterator<Item = &'c char>,
    ) -> BTreeMap<u16, char> {
        let mut glyphs = BTreeMap::new();
        for &ch in used {
            if let Some(gid) = self.glyph_id(ch) {
                glyphs.entry(gid).or_insert(ch);
            }
        }
        glyphs
    }

    /// Write the font and its supporting objects. `used` lists every character drawn with the
    /// font anywhere in the document.
    pub(crate) fn write<'c>(
        &self,
        refs: &mut ObjectReferences,
        id: Id<Font>,
        used: impl IntoIterator<Item = &'c char>,
        writer: &mut Pdf,
    ) {
        let font_index = id.index();
        let glyphs = self.glyphs_for(used);
        let base_font = format!("F{font_index}");
        let scaling = 1000.0 / self.face().units_per_em() as f32;

        // the font program itself
        let data_id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(data_id, &compressed)
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data.len() as i32);

        // descriptor
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face();
        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        writer
            .font_descriptor(descriptor_id)
            .name(Name(base_font.as_bytes()))
            .flags(flags)
            .bbox(pdf_writer::Rect {
                x1: bbox.x_min as f32 * scaling,
                y1: bbox.y_min as f32 * scaling,
                x2: bbox.x_max as f32 * scaling,
                y2: bbox.y_max as f32 * scaling,
            })
            .italic_angle(0.0)
            .ascent(face.ascender() as f32 * scaling)
            .descent(face.descender() as f32 * scaling)
            .cap_height(
                face.capital_height()
                    .unwrap_or(face.ascender()) as f32
                    * scaling,
            )
            .stem_v(80.0)
            .font_file2(data_id);

        // descendant font with the widths of every glyph we draw
        let cid_id = refs.gen(RefType::CidFont(font_index));
        {
            let mut cid_font = writer.cid_font(cid_id);
            cid_font
                .subtype(CidFontType::Type2)
                .base_font(Name(base_font.as_bytes()))
                .system_info(SystemInfo {
                    registry: Str(b"Adobe"),
                    ordering: Str(b"Identity"),
                    supplement: 0,
                })
                .font_descriptor(descriptor_id)
                .default_width(1000.0);
            let mut widths = cid_font.widths();
            for &gid in glyphs.keys() {
                let advance = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default();
                widths.consecutive(gid, [advance as f32 * scaling]);
            }
            widths.finish();
            cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        }

        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let font_id = refs.gen(RefType::Font(font_index));
        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> pdf_writer::Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries each
        let pairs: Vec<(&u16, &char)> = glyphs.iter().collect();
        for block in pairs.chunks(100) {
            // writing into a String cannot fail
            let _ = writeln!(map, "{} beginbfchar", block.len());
            for (gid, ch) in block {
                let mut units = [0u16; 2];
                let _ = write!(map, "<{gid:04x}> <");
                for unit in ch.encode_utf16(&mut units) {
                    let _ = write!(map, "{unit:04x}");
                }
                map.push_str(">\n");
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(id, &compressed).filter(Filter::FlateDecode);

        id
    }
}
