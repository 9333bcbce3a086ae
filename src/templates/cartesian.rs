use super::{centred_block, template_info, Resources};
use crate::colour::{grey, Colour};
use crate::layout::{sections, whole_cells, Margins};
use crate::pagesize::Paper;
use crate::rainbow::rainbow_grid;
use crate::{Document, Draw, In, PDFError, Page, Pt, Rect};
use id_arena::Id;
use pdf_writer::Content;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Square graph paper, optionally checkered or rainbow coloured. Greys are percent black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartesianOptions {
    pub page_size: Paper,
    pub margins: Pt,
    /// Gap between sections when more than one fits on the sheet
    pub spacer: Pt,
    pub grid_space: Pt,
    pub grid_line: Pt,
    pub box_line: Pt,
    pub checkered: bool,
    pub rainbow: bool,
    pub rainbow_lightness: f32,
    /// Colours for the rainbow pattern; the default palette is used when absent or too small
    pub rainbow_scheme: Option<Vec<Colour>>,
    pub checkered_colour: f32,
    pub grid_colour: f32,
    pub box_colour: f32,
    pub background_colour: f32,
    /// Sections across and up the sheet
    pub layout: (usize, usize),
    pub logo_quadrant: u8,
}

impl Default for CartesianOptions {
    fn default() -> Self {
        CartesianOptions {
            page_size: Paper::Letter,
            margins: In(0.5).into(),
            spacer: In(0.25).into(),
            grid_space: In(0.25).into(),
            grid_line: Pt(0.5),
            box_line: Pt(1.0),
            checkered: false,
            rainbow: false,
            rainbow_lightness: 0.95,
            rainbow_scheme: None,
            checkered_colour: 10.0,
            grid_colour: 20.0,
            box_colour: 80.0,
            background_colour: 0.0,
            layout: (1, 1),
            logo_quadrant: 4,
        }
    }
}

/// Add a page of graph paper to `doc`
pub fn cartesian<R: Rng + ?Sized>(
    doc: &mut Document,
    resources: &Resources,
    options: &CartesianOptions,
    rng: &mut R,
) -> Result<Id<Page>, PDFError> {
    if options.checkered && options.rainbow {
        return Err(PDFError::ConflictingPattern);
    }

    let size = options.page_size.size();
    let mut page = Page::new(size, Some(Margins::all(options.margins)));
    for area in sections(size, options.margins, options.spacer, options.layout)? {
        let content = cartesian_section(&area, options, rng)?;
        page.add_content(content);
    }

    if let Some(logo) = resources.logo {
        super::place_logo(doc, &mut page, logo, options.margins, options.logo_quadrant)?;
    }

    doc.set_info(template_info(
        "Cartesian Graph Paper",
        &["graph paper", "cartesian", "grid"],
    ));
    Ok(doc.add_page(page))
}

fn cartesian_section<R: Rng + ?Sized>(
    area: &Rect,
    options: &CartesianOptions,
    rng: &mut R,
) -> Result<Content, PDFError> {
    let space = options.grid_space;
    let cells_x = whole_cells(area.width(), space);
    let cells_y = whole_cells(area.height(), space);
    if cells_x < 1 || cells_y < 1 {
        return Err(PDFError::DoesNotFit(format!(
            "no {space}pt cells fit in {}x{}pt",
            area.width(),
            area.height()
        )));
    }

    let grid = centred_block(area, cells_x, cells_y, space);
    log::debug!(
        "{cells_x}x{cells_y} cartesian grid, {}x{}pt",
        grid.width() + options.box_line,
        grid.height() + options.box_line
    );

    // cell (x, y) counts y from the top row
    let cell = |x: usize, y: usize| {
        Rect::from_origin(
            grid.x1 + space * x as f32,
            grid.y2 - space * (y + 1) as f32,
            space,
            space,
        )
    };

    let mut content = Content::new();

    let background = grey(options.background_colour)?;
    if options.checkered {
        content.fill_colour(grey(options.checkered_colour)?);
        for x in 0..cells_x {
            for y in (0..cells_y).filter(|y| (x + y) % 2 == 0) {
                content.rect_path(&cell(x, y));
            }
        }
        content.fill_nonzero();
    } else if options.rainbow {
        let colours = rainbow_grid(
            rng,
            cells_x,
            cells_y,
            options.rainbow_lightness,
            options.rainbow_scheme.as_deref(),
        )?;
        for (x, y, colour) in colours.iter() {
            content.fill_colour(colour).rect_path(&cell(x, y)).fill_nonzero();
        }
    } else if !background.is_white() {
        content
            .fill_colour(background)
            .rect_path(&grid)
            .fill_nonzero();
    }

    if cells_x > 1 || cells_y > 1 {
        content
            .stroke_colour(grey(options.grid_colour)?)
            .set_line_width(options.grid_line.into());
        for x in 1..cells_x {
            let at = grid.x1 + space * x as f32;
            content.line_path((at, grid.y1), (at, grid.y2));
        }
        for y in 1..cells_y {
            let at = grid.y1 + space * y as f32;
            content.line_path((grid.x1, at), (grid.x2, at));
        }
        content.stroke();
    }

    if options.box_line > Pt(0.0) {
        content
            .stroke_colour(grey(options.box_colour)?)
            .set_line_width(options.box_line.into())
            .rect_path(&grid)
            .stroke();
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_match_letter_graph_paper() {
        let options = CartesianOptions::default();
        assert_eq!(options.grid_space, Pt(18.0));
        assert_eq!(options.margins, Pt(36.0));
        assert_eq!(options.layout, (1, 1));
    }

    #[test]
    fn checkered_rainbow_is_rejected() {
        let mut doc = Document::default();
        let options = CartesianOptions {
            checkered: true,
            rainbow: true,
            ..Default::default()
        };
        let result = cartesian(
            &mut doc,
            &Resources::default(),
            &options,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(PDFError::ConflictingPattern)));
        assert!(doc.page_order.is_empty());
    }

    #[test]
    fn oversized_cells_do_not_fit() {
        let mut doc = Document::default();
        let options = CartesianOptions {
            grid_space: In(20.0).into(),
            ..Default::default()
        };
        let result = cartesian(
            &mut doc,
            &Resources::default(),
            &options,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(PDFError::DoesNotFit(_))));
    }

    fn operators(content: Content) -> Vec<String> {
        String::from_utf8(content.finish().to_vec())
            .unwrap()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn boxless_grid_draws_only_inner_lines() {
        let options = CartesianOptions {
            box_line: Pt(0.0),
            ..Default::default()
        };
        // four cells across, three up
        let area = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(72.0), Pt(54.0));
        let content =
            cartesian_section(&area, &options, &mut StdRng::seed_from_u64(1)).unwrap();
        let ops = operators(content);
        assert_eq!(ops.iter().filter(|op| *op == "l").count(), 3 + 2);
        assert_eq!(ops.iter().filter(|op| *op == "S").count(), 1);
        assert!(!ops.iter().any(|op| op == "re"));
    }

    #[test]
    fn boxed_grid_strokes_a_border() {
        let area = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(72.0), Pt(54.0));
        let ops = operators(
            cartesian_section(
                &area,
                &CartesianOptions::default(),
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap(),
        );
        assert_eq!(ops.iter().filter(|op| *op == "re").count(), 1);
        assert_eq!(ops.iter().filter(|op| *op == "S").count(), 2);
    }

    #[test]
    fn checkered_sheets_ignore_the_background() {
        let options = CartesianOptions {
            checkered: true,
            background_colour: 50.0,
            box_line: Pt(0.0),
            ..Default::default()
        };
        let area = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(72.0), Pt(54.0));
        let ops = operators(
            cartesian_section(&area, &options, &mut StdRng::seed_from_u64(1)).unwrap(),
        );
        // one fill for the shaded cells, none for the background
        assert_eq!(ops.iter().filter(|op| *op == "f").count(), 1);
        assert_eq!(ops.iter().filter(|op| *op == "re").count(), 6);
    }

    #[test]
    fn one_block_per_section() {
        let mut doc = Document::default();
        let options = CartesianOptions {
            layout: (2, 2),
            ..Default::default()
        };
        let id = cartesian(
            &mut doc,
            &Resources::default(),
            &options,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert_eq!(doc.pages[id].contents.len(), 4);
        assert_eq!(
            doc.info.as_ref().and_then(|info| info.title.as_deref()),
            Some("Cartesian Graph Paper")
        );
    }
}
