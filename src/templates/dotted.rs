use super::{centred_block, template_info, Resources};
use crate::colour::{grey, Colour};
use crate::layout::{sections, whole_cells, Margins};
use crate::pagesize::Paper;
use crate::rainbow::rainbow_grid;
use crate::{Document, Draw, In, Mm, PDFError, Page, Pt, Rect};
use id_arena::Id;
use pdf_writer::Content;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Grey of the outline drawn around rainbow dots, in percent black
const RAINBOW_OUTLINE: f32 = 30.0;

/// Dot grid paper. Greys are percent black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DottedOptions {
    pub page_size: Paper,
    pub margins: Pt,
    pub spacer: Pt,
    pub grid_space: Pt,
    /// Diameter of each dot
    pub dot_size: Pt,
    pub box_line: Pt,
    pub rainbow: bool,
    pub rainbow_lightness: f32,
    pub rainbow_scheme: Option<Vec<Colour>>,
    pub dot_colour: f32,
    pub box_colour: f32,
    pub background_colour: f32,
    pub layout: (usize, usize),
    pub logo_quadrant: u8,
}

impl Default for DottedOptions {
    fn default() -> Self {
        DottedOptions {
            page_size: Paper::Letter,
            margins: In(0.5).into(),
            spacer: In(0.25).into(),
            grid_space: In(0.25).into(),
            dot_size: Mm(0.5).into(),
            box_line: Pt(0.0),
            rainbow: false,
            rainbow_lightness: 0.5,
            rainbow_scheme: None,
            dot_colour: 50.0,
            box_colour: 80.0,
            background_colour: 0.0,
            layout: (1, 1),
            logo_quadrant: 4,
        }
    }
}

/// Add a page of dot grid paper to `doc`
pub fn dotted<R: Rng + ?Sized>(
    doc: &mut Document,
    resources: &Resources,
    options: &DottedOptions,
    rng: &mut R,
) -> Result<Id<Page>, PDFError> {
    let size = options.page_size.size();
    let mut page = Page::new(size, Some(Margins::all(options.margins)));
    for area in sections(size, options.margins, options.spacer, options.layout)? {
        let content = dotted_section(&area, options, rng)?;
        page.add_content(content);
    }

    if let Some(logo) = resources.logo {
        super::place_logo(doc, &mut page, logo, options.margins, options.logo_quadrant)?;
    }

    doc.set_info(template_info(
        "Dotted Graph Paper",
        &["graph paper", "dotted", "dot grid"],
    ));
    Ok(doc.add_page(page))
}

/// Where dots go along one axis of a block `cells` wide: dots on the border are only drawn
/// when nothing else marks it. Returns the number of dots and the index of the first one.
fn dot_run(cells: usize, outer: bool) -> (usize, usize) {
    if outer {
        (cells + 1, 0)
    } else {
        (cells.saturating_sub(1), 1)
    }
}

fn dotted_section<R: Rng + ?Sized>(
    area: &Rect,
    options: &DottedOptions,
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
    let block = centred_block(area, cells_x, cells_y, space);

    let background = grey(options.background_colour)?;
    let boxed = options.box_line > Pt(0.0);
    let outer = !boxed && background.is_white();
    let (dots_x, first) = dot_run(cells_x, outer);
    let (dots_y, _) = dot_run(cells_y, outer);
    if dots_x < 1 || dots_y < 1 {
        return Err(PDFError::DoesNotFit(format!(
            "no {space}pt dot grid fits in {}x{}pt",
            area.width(),
            area.height()
        )));
    }
    log::debug!("{dots_x}x{dots_y} dots in a {cells_x}x{cells_y} cell block");

    let mut content = Content::new();

    if boxed || !background.is_white() {
        content.rounded_rect_path(&block, space / 2.0);
        if !background.is_white() {
            content.fill_colour(background);
        }
        if boxed {
            content
                .stroke_colour(grey(options.box_colour)?)
                .set_line_width(options.box_line.into());
        }
        match (boxed, background.is_white()) {
            (true, false) => content.fill_nonzero_and_stroke(),
            (true, true) => content.stroke(),
            _ => content.fill_nonzero(),
        };
    }

    // dot (i, j) counts j from the top
    let centre = |i: usize, j: usize| {
        (
            block.x1 + space * (first + i) as f32,
            block.y2 - space * (first + j) as f32,
        )
    };
    let radius = options.dot_size / 2.0;

    if options.rainbow {
        let colours = rainbow_grid(
            rng,
            dots_x,
            dots_y,
            options.rainbow_lightness,
            options.rainbow_scheme.as_deref(),
        )?;
        content
            .stroke_colour(grey(RAINBOW_OUTLINE)?)
            .set_line_width((options.dot_size / 10.0).into());
        for (i, j, colour) in colours.iter() {
            let (x, y) = centre(i, j);
            content
                .fill_colour(colour)
                .circle_path(x, y, radius)
                .fill_nonzero_and_stroke();
        }
    } else {
        content.fill_colour(grey(options.dot_colour)?);
        for i in 0..dots_x {
            for j in 0..dots_y {
                let (x, y) = centre(i, j);
                content.circle_path(x, y, radius);
            }
        }
        content.fill_nonzero();
    }

    Ok(content)
}
