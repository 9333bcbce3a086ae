//! The page templates. Each one adds a single page to a [Document](crate::Document), built from an
//! options struct that deserializes from a JSON parameter file with every field optional.

mod cartesian;
mod dotted;
mod lined;
mod logo;
mod todo;

pub use cartesian::*;
pub use dotted::*;
pub use lined::*;
pub use logo::*;
pub use todo::*;

use crate::{Font, Image, Info, Pt, Rect};
use id_arena::Id;

/// Document-level objects the templates draw with
#[derive(Debug, Default, Clone, Copy)]
pub struct Resources {
    /// Font for labels. Templates that label things skip the labels without one.
    pub font: Option<Id<Font>>,
    /// Logo stamped into a margin of every page
    pub logo: Option<Id<Image>>,
}

fn template_info(title: &str, keywords: &[&str]) -> Info {
    Info::new()
        .title(title)
        .subject("Page Template")
        .keywords(keywords.iter().copied())
}

/// A `cells_x` by `cells_y` block of square cells, centred in `area`
fn centred_block(area: &Rect, cells_x: usize, cells_y: usize, space: Pt) -> Rect {
    let width = space * cells_x as f32;
    let height = space * cells_y as f32;
    let (cx, cy) = area.centre();
    Rect::from_origin(cx - width / 2.0, cy - height / 2.0, width, height)
}
