//! Turns page and form contents into content stream operators.

use crate::draw::Draw;
use crate::font::Font;
use crate::page::{PageContents, SpanLayout};
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Render contents, in painting order, into one uncompressed content stream. Every item runs
/// in its own graphics state so nothing leaks from one to the next.
pub(crate) fn render_contents(contents: &[PageContents], fonts: &Arena<Font>) -> Vec<u8> {
    let mut stream: Vec<u8> = Vec::new();

    for item in contents.iter() {
        match item {
            PageContents::Text(spans) => {
                let mut content = Content::new();
                content.save_state();
                for span in spans.iter() {
                    show_span(&mut content, span, fonts);
                }
                content.restore_state();
                push_operators(&mut stream, &content.finish());
            }
            PageContents::Image(image) => {
                let position = &image.position;
                let name = format!("I{}", image.image_id.index());
                let mut content = Content::new();
                content.save_state();
                content.transform([
                    position.width().into(),
                    0.0,
                    0.0,
                    position.height().into(),
                    position.x1.into(),
                    position.y1.into(),
                ]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
                push_operators(&mut stream, &content.finish());
            }
            PageContents::RawContent(raw) => {
                // raw operators can't be fed back through Content, so bracket them by hand
                stream.extend_from_slice(b"q\n");
                stream.extend_from_slice(raw);
                stream.extend_from_slice(b"\nQ\n");
            }
            PageContents::FormXObject(layout) => {
                let t = &layout.transform;
                let name = format!("X{}", layout.xobj_id.index());
                let mut content = Content::new();
                content.save_state();
                content.transform([t.a, t.b, t.c, t.d, t.e, t.f]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
                push_operators(&mut stream, &content.finish());
            }
        }
    }

    stream
}

/// Content streams don't end in a newline, so one is added to keep the next item's `q` apart
fn push_operators(stream: &mut Vec<u8>, operators: &[u8]) {
    stream.extend_from_slice(operators);
    if operators.last() != Some(&b'\n') {
        stream.push(b'\n');
    }
}

/// Glyph ids are written as big-endian pairs, as `Identity-H` expects
fn show_span(content: &mut Content, span: &SpanLayout, fonts: &Arena<Font>) {
    let font = &fonts[span.font.id];
    let glyphs: Vec<u8> = span
        .text
        .chars()
        .filter_map(|ch| font.glyph_id(ch))
        .flat_map(u16::to_be_bytes)
        .collect();

    let name = format!("F{}", span.font.id.index());
    let (x, y) = span.coords;
    let (sin, cos) = span.angle.sin_cos();

    content.fill_colour(span.colour);
    content.begin_text();
    content.set_font(Name(name.as_bytes()), span.font.size.into());
    content.set_text_matrix([cos, sin, -sin, cos, x.into(), y.into()]);
    content.show(Str(&glyphs));
    content.end_text();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_xobject::{FormXObject, FormXObjectLayout};
    use crate::transform::Transform;
    use crate::units::Pt;

    #[test]
    fn every_item_gets_its_own_graphics_state() {
        let mut forms: Arena<FormXObject> = Arena::new();
        let form = forms.alloc(FormXObject::new(Pt(10.0), Pt(10.0)));
        let contents = vec![
            PageContents::RawContent(b"0 0 m 1 1 l S".to_vec()),
            PageContents::FormXObject(FormXObjectLayout {
                xobj_id: form,
                transform: Transform::translate(Pt(36.0), Pt(72.0)),
            }),
        ];

        let stream = String::from_utf8(render_contents(&contents, &Arena::new())).unwrap();
        assert_eq!(stream.matches("q\n").count(), 2);
        assert_eq!(stream.matches("Q\n").count(), 2);
        assert!(stream.contains("1 0 0 1 36 72 cm"));
        assert!(stream.contains("/X0 Do"));
    }

    #[test]
    fn adjacent_items_do_not_fuse_operators() {
        let mut forms: Arena<FormXObject> = Arena::new();
        let form = forms.alloc(FormXObject::new(Pt(10.0), Pt(10.0)));
        let placement = |y: f32| {
            PageContents::FormXObject(FormXObjectLayout {
                xobj_id: form,
                transform: Transform::translate(Pt(0.0), Pt(y)),
            })
        };
        let contents = vec![
            placement(0.0),
            placement(100.0),
            PageContents::RawContent(b"0 0 m".to_vec()),
        ];

        let stream = String::from_utf8(render_contents(&contents, &Arena::new())).unwrap();
        assert!(!stream.contains("Qq"));
        let operators: Vec<&str> = stream.split_whitespace().collect();
        let saves = operators.iter().filter(|op| **op == "q").count();
        let restores = operators.iter().filter(|op| **op == "Q").count();
        assert_eq!(saves, 3);
        assert_eq!(restores, 3);
    }
}
