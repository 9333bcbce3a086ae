use super::{template_info, Resources};
use crate::colour::{grey, Colour};
use crate::layout::{sections, Margins};
use crate::pagesize::Paper;
use crate::rainbow::rainbow_row;
use crate::{Document, Draw, In, Mm, PDFError, Page, Pt, Rect};
use id_arena::Id;
use pdf_writer::types::LineCapStyle;
use pdf_writer::Content;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Padding between a section's box and its lines
const BOXED_PADDING: Mm = Mm(2.0);
/// Space left above the first line of a borderless page
const BORDERLESS_ABOVE: In = In(1.0);
/// Space left below the last line of a borderless page
const BORDERLESS_BELOW: In = In(0.25);

/// Ruled paper, either boxed sections or a borderless page with a margin guide. Greys are
/// percent black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinedOptions {
    pub page_size: Paper,
    pub margins: Pt,
    pub spacer: Pt,
    pub line_space: Pt,
    pub line_width: Pt,
    pub box_line: Pt,
    pub rainbow: bool,
    pub rainbow_lightness: f32,
    pub rainbow_scheme: Option<Vec<Colour>>,
    pub line_colour: f32,
    pub box_colour: f32,
    pub background_colour: f32,
    pub layout: (usize, usize),
    pub logo_quadrant: u8,
    /// Rule the whole page edge to edge instead of boxed sections
    pub borderless: bool,
    /// Draw a vertical margin guide on borderless pages
    pub guide_line: bool,
    /// Distance of the margin guide from the left edge
    pub guide_space: Pt,
    pub guide_width: Pt,
}

impl Default for LinedOptions {
    fn default() -> Self {
        LinedOptions {
            page_size: Paper::Letter,
            margins: In(0.5).into(),
            spacer: In(0.25).into(),
            line_space: In(9.0 / 32.0).into(),
            line_width: Pt(0.5),
            box_line: Pt(1.0),
            rainbow: false,
            rainbow_lightness: 0.6,
            rainbow_scheme: None,
            line_colour: 50.0,
            box_colour: 80.0,
            background_colour: 0.0,
            layout: (1, 1),
            logo_quadrant: 4,
            borderless: false,
            guide_line: true,
            guide_space: In(1.25).into(),
            guide_width: Pt(1.0),
        }
    }
}

/// Heights of the lines ruled across `area`, top to bottom.
///
/// The first line sits `above` below the padded top edge (one `spacing` by default) and no
/// line comes closer than `below` to the padded bottom edge (a quarter `spacing` by default).
/// Areas too short for two lines are an error.
pub fn rule_section(
    area: &Rect,
    padding: Pt,
    spacing: Pt,
    above: Option<Pt>,
    below: Option<Pt>,
) -> Result<Vec<Pt>, PDFError> {
    let above = above.unwrap_or(spacing);
    let below = below.unwrap_or(spacing / 4.0);
    if spacing <= Pt(0.0) {
        return Err(PDFError::NoLines);
    }

    let usable = area.height() - padding * 2.0 - above - below;
    let lines = (usable / spacing).floor() + 1.0;
    if lines < 2.0 {
        return Err(PDFError::NoLines);
    }

    let top = area.y2 - padding - above;
    Ok((0..lines as usize)
        .map(|i| top - spacing * i as f32)
        .collect())
}

/// Add a page of lined paper to `doc`
pub fn lined<R: Rng + ?Sized>(
    doc: &mut Document,
    resources: &Resources,
    options: &LinedOptions,
    rng: &mut R,
) -> Result<Id<Page>, PDFError> {
    let size = options.page_size.size();
    let mut page = Page::new(size, Some(Margins::all(options.margins)));

    if options.borderless {
        let area = page.media_box;
        let heights = rule_section(
            &area,
            Pt(0.0),
            options.line_space,
            Some(BORDERLESS_ABOVE.into()),
            Some(BORDERLESS_BELOW.into()),
        )?;
        let mut content = rule(&area, Pt(0.0), &heights, options, rng)?;
        if options.guide_line {
            let x = area.x1 + options.guide_space;
            content
                .stroke_colour(grey(options.line_colour)?)
                .set_line_width(options.guide_width.into())
                .line_path((x, area.y1), (x, area.y2))
                .stroke();
        }
        page.add_content(content);
    } else {
        let padding: Pt = BOXED_PADDING.into();
        for area in sections(size, options.margins, options.spacer, options.layout)? {
            let heights = rule_section(&area, padding, options.line_space, None, None)?;
            let mut content = Content::new();
            boxed(&mut content, &area, options)?;
            page.add_content(content);
            page.add_content(rule(&area, padding, &heights, options, rng)?);
        }
    }

    if let Some(logo) = resources.logo {
        super::place_logo(doc, &mut page, logo, options.margins, options.logo_quadrant)?;
    }

    doc.set_info(template_info("Lined Paper", &["lined paper", "ruled"]));
    Ok(doc.add_page(page))
}

fn boxed(content: &mut Content, area: &Rect, options: &LinedOptions) -> Result<(), PDFError> {
    let background = grey(options.background_colour)?;
    let stroked = options.box_line > Pt(0.0);
    let filled = !background.is_white();
    if !stroked && !filled {
        return Ok(());
    }

    content.rounded_rect_path(area, options.line_space / 3.0);
    content.fill_colour(background);
    content
        .stroke_colour(grey(options.box_colour)?)
        .set_line_width(options.box_line.into());
    match (stroked, filled) {
        (true, true) => content.fill_nonzero_and_stroke(),
        (true, false) => content.stroke(),
        _ => content.fill_nonzero(),
    };
    Ok(())
}

fn rule<R: Rng + ?Sized>(
    area: &Rect,
    padding: Pt,
    heights: &[Pt],
    options: &LinedOptions,
    rng: &mut R,
) -> Result<Content, PDFError> {
    let (x1, x2) = (area.x1 + padding, area.x2 - padding);
    log::debug!("{} lines from {x1} to {x2}", heights.len());

    let mut content = Content::new();
    content
        .set_line_width(options.line_width.into())
        .set_line_cap(LineCapStyle::RoundCap);

    if options.rainbow {
        let colours = rainbow_row(
            rng,
            heights.len(),
            options.rainbow_lightness,
            options.rainbow_scheme.as_deref(),
        )?;
        for (&y, colour) in heights.iter().zip(colours) {
            content
                .stroke_colour(colour)
                .line_path((x1, y), (x2, y))
                .stroke();
        }
    } else {
        content.stroke_colour(grey(options.line_colour)?);
        for &y in heights {
            content.line_path((x1, y), (x2, y));
        }
        content.stroke();
    }

    Ok(content)
}
