//! Vector drawing helpers on top of [pdf_writer::Content].

use crate::colour::Colour;
use crate::rect::Rect;
use crate::units::Pt;
use pdf_writer::Content;

/// How far along a tangent the control points of a quarter-circle Bézier sit, as a fraction of
/// the radius
const KAPPA: f32 = 0.5523;

/// Drawing operations the templates share. Path methods only build the path; paint it with
/// [Content::stroke], [Content::fill_nonzero] or [Content::fill_nonzero_and_stroke].
pub trait Draw {
    /// Set the fill colour in whichever colour space the colour is in
    fn fill_colour(&mut self, colour: Colour) -> &mut Self;

    /// Set the stroke colour in whichever colour space the colour is in
    fn stroke_colour(&mut self, colour: Colour) -> &mut Self;

    /// Add a rectangle to the path
    fn rect_path(&mut self, rect: &Rect) -> &mut Self;

    /// Add a rectangle with corners rounded to `radius` to the path
    fn rounded_rect_path(&mut self, rect: &Rect, radius: Pt) -> &mut Self;

    /// Add a circle of radius `radius` centred on `(x, y)` to the path
    fn circle_path(&mut self, x: Pt, y: Pt, radius: Pt) -> &mut Self;

    /// Add a straight line segment to the path
    fn line_path(&mut self, from: (Pt, Pt), to: (Pt, Pt)) -> &mut Self;
}

impl Draw for Content {
    fn fill_colour(&mut self, colour: Colour) -> &mut Self {
        match colour {
            Colour::RGB { r, g, b } => self.set_fill_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.set_fill_cmyk(c, m, y, k),
            Colour::Grey { g } => self.set_fill_gray(g),
        }
    }

    fn stroke_colour(&mut self, colour: Colour) -> &mut Self {
        match colour {
            Colour::RGB { r, g, b } => self.set_stroke_rgb(r, g, b),
            Colour::CMYK { c, m, y, k } => self.set_stroke_cmyk(c, m, y, k),
            Colour::Grey { g } => self.set_stroke_gray(g),
        }
    }

    fn rect_path(&mut self, rect: &Rect) -> &mut Self {
        self.rect(
            rect.x1.into(),
            rect.y1.into(),
            rect.width().into(),
            rect.height().into(),
        )
    }

    fn rounded_rect_path(&mut self, rect: &Rect, radius: Pt) -> &mut Self {
        let radius = radius
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0)
            .max(Pt(0.0));
        if radius <= Pt(0.0) {
            return self.rect_path(rect);
        }

        let (x1, y1, x2, y2) = (*rect.x1, *rect.y1, *rect.x2, *rect.y2);
        let r = *radius;
        let k = r * KAPPA;

        self.move_to(x1 + r, y1);
        self.line_to(x2 - r, y1);
        self.cubic_to(x2 - r + k, y1, x2, y1 + r - k, x2, y1 + r);
        self.line_to(x2, y2 - r);
        self.cubic_to(x2, y2 - r + k, x2 - r + k, y2, x2 - r, y2);
        self.line_to(x1 + r, y2);
        self.cubic_to(x1 + r - k, y2, x1, y2 - r + k, x1, y2 - r);
        self.line_to(x1, y1 + r);
        self.cubic_to(x1, y1 + r - k, x1 + r - k, y1, x1 + r, y1);
        self.close_path()
    }

    fn circle_path(&mut self, x: Pt, y: Pt, radius: Pt) -> &mut Self {
        let (x, y, r) = (*x, *y, *radius);
        let k = r * KAPPA;

        self.move_to(x + r, y);
        self.cubic_to(x + r, y + k, x + k, y + r, x, y + r);
        self.cubic_to(x - k, y + r, x - r, y + k, x - r, y);
        self.cubic_to(x - r, y - k, x - k, y - r, x, y - r);
        self.cubic_to(x + k, y - r, x + r, y - k, x + r, y);
        self.close_path()
    }

    fn line_path(&mut self, from: (Pt, Pt), to: (Pt, Pt)) -> &mut Self {
        self.move_to(from.0.into(), from.1.into());
        self.line_to(to.0.into(), to.1.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::grey;

    fn ops(content: Content) -> String {
        String::from_utf8(content.finish().to_vec()).expect("content is ascii")
    }

    #[test]
    fn colours_pick_their_operator() {
        let mut content = Content::new();
        content.fill_colour(Colour::new_rgb(1.0, 0.0, 0.0));
        content.stroke_colour(grey(50.0).unwrap());
        content.fill_colour(Colour::new_grey(0.5));
        let ops = ops(content);
        assert!(ops.contains("1 0 0 rg"));
        assert!(ops.contains("0 0 0 0.5 K"));
        assert!(ops.contains("0.5 g"));
    }

    #[test]
    fn circles_are_four_curves() {
        let mut content = Content::new();
        content.circle_path(Pt(10.0), Pt(10.0), Pt(2.0));
        let ops = ops(content);
        assert_eq!(ops.matches(" c").count(), 4);
        assert!(ops.trim_end().ends_with('h'));
    }

    #[test]
    fn zero_radius_is_a_plain_rectangle() {
        let mut content = Content::new();
        content.rounded_rect_path(
            &Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(5.0)),
            Pt(0.0),
        );
        assert_eq!(ops(content).trim(), "0 0 10 5 re");
    }
}
