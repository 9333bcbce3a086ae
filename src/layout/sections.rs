use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;

/// Split the page inside `margins` into `up.0` columns and `up.1` rows of equally sized
/// sections, separated from each other by `spacer`. A layout with a zero component is treated
/// as a single section.
///
/// Sections are returned column by column starting from the left, and bottom to top within
/// each column.
pub fn sections(
    size: PageSize,
    margins: Pt,
    spacer: Pt,
    up: (usize, usize),
) -> Result<Vec<Rect>, PDFError> {
    let (up_w, up_h) = if up.0 == 0 || up.1 == 0 { (1, 1) } else { up };
    let (page_w, page_h) = size;

    let area_w = (page_w - margins * 2.0 - spacer * (up_w - 1) as f32) / up_w as f32;
    let area_h = (page_h - margins * 2.0 - spacer * (up_h - 1) as f32) / up_h as f32;
    if area_w < Pt(0.0) || area_h < Pt(0.0) {
        return Err(PDFError::DoesNotFit(format!(
            "{up_w}x{up_h} sections leave {area_w}x{area_h}pt each"
        )));
    }

    let mut areas = Vec::with_capacity(up_w * up_h);
    let mut x = margins;
    for _ in 0..up_w {
        let mut y = margins;
        for _ in 0..up_h {
            areas.push(Rect::from_origin(x, y, area_w, area_h));
            y += area_h + spacer;
        }
        x += area_w + spacer;
    }

    log::debug!("{} sections of {area_w}x{area_h}pt", areas.len());
    Ok(areas)
}

/// How many whole cells of size `spacing` fit along `length`
pub fn whole_cells(length: Pt, spacing: Pt) -> usize {
    if spacing <= Pt(0.0) || length <= Pt(0.0) {
        return 0;
    }
    (length / spacing).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::LETTER;

    #[test]
    fn single_section_fills_the_margins() {
        let areas = sections(LETTER, Pt(36.0), Pt(18.0), (1, 1)).unwrap();
        assert_eq!(areas, vec![Rect::from_origin(Pt(36.0), Pt(36.0), Pt(540.0), Pt(720.0))]);
    }

    #[test]
    fn zero_layout_is_a_single_section() {
        let areas = sections(LETTER, Pt(36.0), Pt(18.0), (0, 3)).unwrap();
        assert_eq!(areas.len(), 1);
    }

    #[test]
    fn sections_go_up_each_column_then_right() {
        let areas = sections((Pt(100.0), Pt(100.0)), Pt(10.0), Pt(20.0), (2, 2)).unwrap();
        let origins: Vec<(Pt, Pt)> = areas.iter().map(|r| (r.x1, r.y1)).collect();
        assert_eq!(
            origins,
            vec![
                (Pt(10.0), Pt(10.0)),
                (Pt(10.0), Pt(60.0)),
                (Pt(60.0), Pt(10.0)),
                (Pt(60.0), Pt(60.0)),
            ]
        );
        assert!(areas.iter().all(|r| r.width() == Pt(30.0)));
    }

    #[test]
    fn too_many_sections_do_not_fit() {
        assert!(matches!(
            sections((Pt(100.0), Pt(100.0)), Pt(10.0), Pt(20.0), (6, 1)),
            Err(PDFError::DoesNotFit(_))
        ));
    }

    #[test]
    fn counts_whole_cells() {
        assert_eq!(whole_cells(Pt(100.0), Pt(18.0)), 5);
        assert_eq!(whole_cells(Pt(10.0), Pt(18.0)), 0);
        assert_eq!(whole_cells(Pt(10.0), Pt(0.0)), 0);
    }
}
