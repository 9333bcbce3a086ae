use crate::colour::Colour;
use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use crate::units::Pt;

/// Calculates the vertical offset from a text coordinate to the font's baseline.
///
/// In PDF, text coordinates specify the baseline position. This returns the negative ascent,
/// which can be added to a y-coordinate to hang text from a top reference point.
pub fn baseline_offset(font: &Font, size: Pt) -> Pt {
    -font.ascent(size)
}

/// Calculate the width of a given string of text given the font and font size
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars()
        .filter_map(|ch| font.glyph_id(ch))
        .map(|gid| font.advance(gid, size))
        .sum()
}

/// Lay out `text` so that it is centred on `centre`: horizontally along the direction of the
/// text, and vertically on the height of its capital letters. `angle` rotates the text
/// counter-clockwise, in radians.
pub fn centred_span<S: ToString>(
    text: S,
    font: &Font,
    span_font: SpanFont,
    colour: Colour,
    centre: (Pt, Pt),
    angle: f32,
) -> SpanLayout {
    let text = text.to_string();
    let half_width = width_of_text(&text, font, span_font.size) / 2.0;
    let half_cap = font.cap_height(span_font.size) / 2.0;
    let (sin, cos) = angle.sin_cos();

    // back off half the width along the baseline and half the cap height across it
    let x = centre.0 - half_width * cos + half_cap * sin;
    let y = centre.1 - half_width * sin - half_cap * cos;

    SpanLayout {
        text,
        font: span_font,
        colour,
        coords: (x, y),
        angle,
    }
}
