use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// Margins are used when laying out objects on a page. There is no control
/// preventing objects on pages to overflow the margins; the margins are there
/// as guidelines for layout functions. Additionally, the margins are applied
/// to [`Page`](crate::Page)s to determine the `ArtBox` attribute of each page in the
/// generated PDF
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins with equal top and bottom, and equal left and right
    pub fn symmetric<V: Into<Pt>, H: Into<Pt>>(vertical: V, horizontal: H) -> Margins {
        let (vertical, horizontal) = (vertical.into(), horizontal.into());
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// The area of a page of the given size that lies within the margins
    pub fn content_box(&self, size: PageSize) -> Rect {
        Rect {
            x1: self.left,
            y1: self.bottom,
            x2: size.0 - self.right,
            y2: size.1 - self.top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::In;

    #[test]
    fn content_box_sits_inside_margins() {
        let margins = Margins::all(In(0.5));
        let content = margins.content_box((Pt(612.0), Pt(792.0)));
        assert_eq!(content.x1, Pt(36.0));
        assert_eq!(content.y2, Pt(756.0));
        assert_eq!(content.width(), Pt(540.0));
        assert_eq!(Margins::empty().content_box((Pt(1.0), Pt(2.0))).height(), Pt(2.0));
    }

    #[test]
    fn symmetric_margins() {
        let margins = Margins::symmetric(Pt(10.0), In(1.0));
        assert_eq!(margins.top, margins.bottom);
        assert_eq!(margins.left, Pt(72.0));
    }
}
