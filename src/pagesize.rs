//! Paper sizes the templates can be printed on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`] trait to convert between portrait and landscape.
//!
//! ```
//! use givesheet::pagesize::{Paper, PageOrientation, LETTER};
//!
//! assert_eq!(Paper::Letter.size(), LETTER);
//! let (w, h) = Paper::A4.size().landscape();
//! assert!(w > h);
//! ```

use crate::units::*;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const HALF_LETTER: PageSize = (Pt(5.5 * 72.0), Pt(8.5 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// A paper size as named in parameter files
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paper {
    #[default]
    Letter,
    HalfLetter,
    Legal,
    Tabloid,
    A3,
    A4,
    A5,
    /// Any other size, width and height in points
    Custom { width: Pt, height: Pt },
}

impl Paper {
    /// The portrait dimensions of the paper
    pub fn size(&self) -> PageSize {
        match *self {
            Paper::Letter => LETTER,
            Paper::HalfLetter => HALF_LETTER,
            Paper::Legal => LEGAL,
            Paper::Tabloid => TABLOID,
            Paper::A3 => A3,
            Paper::A4 => A4,
            Paper::A5 => A5,
            Paper::Custom { width, height } => (width, height).portrait(),
        }
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}
