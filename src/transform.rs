//! Placement matrices for form XObjects.

use crate::units::*;

/// A PDF transformation matrix `[a b c d e f]`, with (0, 0) at the bottom-left of the page.
///
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    /// Move content by `(x, y)`
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: *x,
            f: *y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_only_moves_the_origin() {
        let moved = Transform::translate(Pt(10.0), Pt(5.0));
        assert_eq!((moved.a, moved.b, moved.c, moved.d), (1.0, 0.0, 0.0, 1.0));
        assert_eq!((moved.e, moved.f), (10.0, 5.0));
    }
}
