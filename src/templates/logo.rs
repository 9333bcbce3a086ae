use crate::{Document, Image, ImageLayout, PDFError, Page, Pt, Rect};
use id_arena::Id;

/// Stamp `image` into the margin band of `page`. The logo is scaled to half the margin height,
/// centred vertically in the band, and sits flush with the edge of the content area.
///
/// Quadrants are numbered as on a Cartesian plane: 1 top-right, 2 top-left, 3 bottom-left and
/// 4 bottom-right.
pub fn place_logo(
    doc: &Document,
    page: &mut Page,
    image: Id<Image>,
    margins: Pt,
    quadrant: u8,
) -> Result<(), PDFError> {
    let (right, top) = match quadrant {
        1 => (true, true),
        2 => (false, true),
        3 => (false, false),
        4 => (true, false),
        _ => return Err(PDFError::InvalidQuadrant(quadrant)),
    };

    let height = margins / 2.0;
    let width = height * doc.images[image].aspect_ratio();

    let x = if right {
        page.width() - margins - width
    } else {
        margins
    };
    let y = if top {
        page.height() - margins / 2.0 - height / 2.0
    } else {
        margins / 2.0 - height / 2.0
    };

    log::debug!("logo at ({x}, {y}), {width}x{height}pt in quadrant {quadrant}");
    page.add_image(ImageLayout {
        image_id: image,
        position: Rect::from_origin(x, y, width, height),
    });
    Ok(())
}
