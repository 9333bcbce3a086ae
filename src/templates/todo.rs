//! A weekly planner: one row per topic, one column per day, with a fillable "week of" field and
//! an optional legend explaining the shaded cells.

use super::{template_info, Resources};
use crate::colour::{colours, grey, Colour};
use crate::layout::{centred_span, width_of_text, Margins};
use crate::pagesize::{PageOrientation, Paper};
use crate::rainbow::rainbow_row;
use crate::{
    Document, Draw, FieldNamer, Font, FormXObject, FormXObjectLayout, In, PDFError, Page, Pt,
    Rect, SpanFont, SpanLayout, TextField, Transform,
};
use id_arena::Id;
use pdf_writer::Content;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Longest topic that still fits its rotated label
pub const MAX_TOPIC_LEN: usize = 40;

/// Height of the row above the grid holding the "week of" field and the legend
const KEY_HEIGHT: Pt = Pt(24.0);
const KEY_GAP: Pt = Pt(2.0);
const HEADER_HEIGHT: Pt = Pt(12.0);
/// Label height plus padding on either side
const TOPIC_WIDTH: Pt = Pt(12.0 + 2.0 * 2.0);
const LABEL_SIZE: Pt = Pt(8.0);
const FIELD_WIDTH: Pt = Pt(100.0);
const FIELD_SIZE: Pt = Pt(12.0);
const SWATCH: Pt = Pt(12.0);
const LEGEND_GAP: Pt = Pt(8.0);

/// One entry of the legend: a swatch in `grey` percent black, explained by `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub grey: f32,
    pub label: String,
}

/// Weekly planner. Greys are percent black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoOptions {
    /// The topics, one per row
    pub items: Vec<String>,
    pub page_size: Paper,
    pub margins: Pt,
    /// Two copies of the week on a portrait sheet instead of one on a landscape sheet
    pub half_page: bool,
    /// Split the days over two grids either side of the fold
    pub booklet: bool,
    /// Space kept clear on each side of the fold in booklet mode
    pub binding: Pt,
    pub include_weekend: bool,
    /// Saturday and Sunday share one column, replacing the notes column
    pub collapse_weekend: bool,
    pub grid_line: Pt,
    pub grid_colour: f32,
    /// Grey for each cell, indexed by topic then day
    pub shading: Vec<Vec<f32>>,
    pub legend: Vec<LegendEntry>,
    /// Tint the topic column
    pub rainbow: bool,
    pub rainbow_lightness: f32,
    pub rainbow_scheme: Option<Vec<Colour>>,
    pub logo_quadrant: u8,
}

impl Default for TodoOptions {
    fn default() -> Self {
        TodoOptions {
            items: Vec::new(),
            page_size: Paper::Letter,
            margins: In(0.5).into(),
            half_page: false,
            booklet: false,
            binding: In(0.25).into(),
            include_weekend: true,
            collapse_weekend: false,
            grid_line: Pt(0.7),
            grid_colour: 20.0,
            shading: Vec::new(),
            legend: Vec::new(),
            rainbow: false,
            rainbow_lightness: 0.7,
            rainbow_scheme: None,
            logo_quadrant: 4,
        }
    }
}

/// Column headings for the days of the week
pub fn day_labels(include_weekend: bool, collapse_weekend: bool) -> Vec<&'static str> {
    let mut days = vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
    match (include_weekend, collapse_weekend) {
        (true, false) => days.extend(["Saturday", "Sunday", "Notes"]),
        (true, true) => days.push("Weekend"),
        (false, _) => days.push("Notes"),
    }
    days
}

/// Add a weekly planner page to `doc`. Every week on the page gets a "week of" field named by
/// `namer`.
pub fn todo<R: Rng + ?Sized>(
    doc: &mut Document,
    resources: &Resources,
    options: &TodoOptions,
    namer: &mut FieldNamer,
    rng: &mut R,
) -> Result<Id<Page>, PDFError> {
    for topic in options.items.iter() {
        let len = topic.chars().count();
        if len > MAX_TOPIC_LEN {
            return Err(PDFError::TopicTooLong {
                topic: topic.clone(),
                len,
                max: MAX_TOPIC_LEN,
            });
        }
    }
    let topics: Vec<String> = if options.items.is_empty() {
        vec![String::new()]
    } else {
        options.items.clone()
    };

    let topic_colours = if options.rainbow {
        Some(rainbow_row(
            rng,
            topics.len(),
            options.rainbow_lightness,
            options.rainbow_scheme.as_deref(),
        )?)
    } else {
        None
    };

    if resources.font.is_none() {
        log::warn!("no font given, the planner will be drawn without labels");
    }

    let margins = options.margins;
    let mut page = if options.half_page {
        let (page_w, page_h) = options.page_size.size().portrait();
        let area_w = page_w - margins * 2.0;
        let area_h = (page_h - margins * 4.0) / 2.0;

        let week = {
            let planner = Planner::new(
                doc,
                resources,
                options,
                &topics,
                topic_colours.as_deref(),
            );
            let area = Rect::from_origin(Pt(0.0), Pt(0.0), area_w, area_h);
            planner.week(&area, page_w / 2.0 - margins)?
        };

        let mut form = FormXObject::new(area_w, area_h);
        form.add_content(week.content);
        for span in week.spans {
            form.add_span(span);
        }
        let form_id = doc.add_form_xobject(form);

        let mut page = Page::new((page_w, page_h), Some(Margins::all(margins)));
        for y in [margins, page_h / 2.0 + margins] {
            page.add_form_xobject(FormXObjectLayout {
                xobj_id: form_id,
                transform: Transform::translate(margins, y),
            });
            page.add_field(week_field(namer, week.field.translate(margins, y)));
        }
        page
    } else {
        let size = options.page_size.size().landscape();
        let mut page = Page::new(size, Some(Margins::all(margins)));
        let area = page.content_box;

        let week = {
            let planner = Planner::new(
                doc,
                resources,
                options,
                &topics,
                topic_colours.as_deref(),
            );
            planner.week(&area, size.0 / 2.0)?
        };
        page.add_content(week.content);
        for span in week.spans {
            page.add_span(span);
        }
        page.add_field(week_field(namer, week.field));
        page
    };

    if let Some(logo) = resources.logo {
        super::place_logo(doc, &mut page, logo, margins, options.logo_quadrant)?;
    }

    doc.set_info(template_info(
        "Weekly To-Do List",
        &["planner", "to-do", "weekly"],
    ));
    Ok(doc.add_page(page))
}

fn week_field(namer: &mut FieldNamer, rect: Rect) -> TextField {
    TextField {
        name: namer.next_name(),
        rect,
        font_size: FIELD_SIZE,
        tooltip: Some("Week of".to_string()),
    }
}

/// One rendered week, in the coordinates of the area it was laid out in
struct Week {
    content: Content,
    spans: Vec<SpanLayout>,
    field: Rect,
}

/// One grid of the week: every day column, or half of them in booklet mode
struct Grid<'d> {
    rect: Rect,
    days: &'d [&'static str],
    /// Index of the grid's first day within the whole week, for looking up shading
    first_day: usize,
}

struct Planner<'a> {
    options: &'a TodoOptions,
    topics: &'a [String],
    topic_colours: Option<&'a [Colour]>,
    font: Option<(SpanFont, &'a Font)>,
}

impl<'a> Planner<'a> {
    fn new(
        doc: &'a Document,
        resources: &Resources,
        options: &'a TodoOptions,
        topics: &'a [String],
        topic_colours: Option<&'a [Colour]>,
    ) -> Planner<'a> {
        let font = resources.font.map(|id| {
            (
                SpanFont {
                    id,
                    size: LABEL_SIZE,
                },
                &doc.fonts[id],
            )
        });
        Planner {
            options,
            topics,
            topic_colours,
            font,
        }
    }

    fn label(&self, text: &str, centre: (Pt, Pt), angle: f32) -> Option<SpanLayout> {
        self.font.map(|(span_font, font)| {
            centred_span(text, font, span_font, colours::BLACK, centre, angle)
        })
    }

    fn label_width(&self, text: &str) -> Pt {
        self.font
            .map(|(span_font, font)| width_of_text(text, font, span_font.size))
            .unwrap_or_default()
    }

    /// Lay out a week in `area`. In booklet mode the fold sits at `fold`.
    fn week(&self, area: &Rect, fold: Pt) -> Result<Week, PDFError> {
        let grid_h = area.height() - KEY_HEIGHT - KEY_GAP;
        if grid_h <= HEADER_HEIGHT {
            return Err(PDFError::DoesNotFit(format!(
                "a week needs more than {}pt, got {}pt",
                KEY_HEIGHT + KEY_GAP + HEADER_HEIGHT,
                area.height()
            )));
        }

        let days = day_labels(self.options.include_weekend, self.options.collapse_weekend);
        let grids = if self.options.booklet {
            let width = (area.width() - self.options.binding * 2.0) / 2.0;
            let (left, right) = days.split_at(days.len() / 2);
            vec![
                Grid {
                    rect: Rect::from_origin(area.x1, area.y1, width, grid_h),
                    days: left,
                    first_day: 0,
                },
                Grid {
                    rect: Rect::from_origin(fold + self.options.binding, area.y1, width, grid_h),
                    days: right,
                    first_day: left.len(),
                },
            ]
        } else {
            vec![Grid {
                rect: Rect::from_origin(area.x1, area.y1, area.width(), grid_h),
                days: &days,
                first_day: 0,
            }]
        };

        let mut content = Content::new();
        let mut spans = Vec::new();
        for grid in grids.iter() {
            self.grid(&mut content, &mut spans, grid)?;
        }

        let key = Rect::from_origin(area.x1, area.y2 - KEY_HEIGHT, area.width(), KEY_HEIGHT);
        let field = self.key(&mut content, &mut spans, &key)?;

        Ok(Week {
            content,
            spans,
            field,
        })
    }

    fn grid(
        &self,
        content: &mut Content,
        spans: &mut Vec<SpanLayout>,
        grid: &Grid,
    ) -> Result<(), PDFError> {
        let rect = &grid.rect;
        let cols = grid.days.len();
        let rows = self.topics.len();
        let col_w = (rect.width() - TOPIC_WIDTH) / cols as f32;
        let row_h = (rect.height() - HEADER_HEIGHT) / rows as f32;
        if col_w <= Pt(0.0) || row_h <= Pt(0.0) {
            return Err(PDFError::DoesNotFit(format!(
                "{cols} days by {rows} topics in {}x{}pt",
                rect.width(),
                rect.height()
            )));
        }
        log::debug!("{cols}x{rows} planner grid, cells {col_w}x{row_h}pt");

        let x_topic = rect.x1 + TOPIC_WIDTH;
        let y_header = rect.y2 - HEADER_HEIGHT;
        let col_x = |c: usize| x_topic + col_w * c as f32;
        // rows count down from the header
        let row_y = |r: usize| y_header - row_h * r as f32;

        if let Some(topic_colours) = self.topic_colours {
            for (r, colour) in topic_colours.iter().enumerate() {
                content
                    .fill_colour(*colour)
                    .rect_path(&Rect::from_origin(rect.x1, row_y(r + 1), TOPIC_WIDTH, row_h))
                    .fill_nonzero();
            }
        }

        for (r, shades) in self.options.shading.iter().take(rows).enumerate() {
            for (c, &shade) in shades.iter().skip(grid.first_day).take(cols).enumerate() {
                let fill = grey(shade)?;
                if fill.is_white() {
                    continue;
                }
                content
                    .fill_colour(fill)
                    .rect_path(&Rect::from_origin(col_x(c), row_y(r + 1), col_w, row_h))
                    .fill_nonzero();
            }
        }

        content.stroke_colour(grey(self.options.grid_colour)?);

        // inner body grid
        content.set_line_width((self.options.grid_line / 2.0).into());
        for c in 1..cols {
            content.line_path((col_x(c), rect.y1), (col_x(c), y_header));
        }
        for r in 1..rows {
            content.line_path((x_topic, row_y(r)), (rect.x2, row_y(r)));
        }
        content.stroke();

        // full grid around the topics and headers, below the last row and after the last column
        content.set_line_width(self.options.grid_line.into());
        for x in [rect.x1, x_topic] {
            content.line_path((x, rect.y1), (x, rect.y2));
        }
        for r in 1..rows {
            content.line_path((rect.x1, row_y(r)), (x_topic, row_y(r)));
        }
        for y in [rect.y2, y_header, rect.y1] {
            content.line_path((rect.x1, y), (rect.x2, y));
        }
        for c in 1..=cols {
            content.line_path((col_x(c), y_header), (col_x(c), rect.y2));
        }
        content.line_path((rect.x2, rect.y1), (rect.x2, y_header));
        content.stroke();

        for (c, day) in grid.days.iter().enumerate() {
            let centre = (col_x(c) + col_w / 2.0, y_header + HEADER_HEIGHT / 2.0);
            spans.extend(self.label(day, centre, 0.0));
        }
        for (r, topic) in self.topics.iter().enumerate() {
            if topic.is_empty() {
                continue;
            }
            let centre = (rect.x1 + TOPIC_WIDTH / 2.0, row_y(r) - row_h / 2.0);
            spans.extend(self.label(topic, centre, FRAC_PI_2));
        }

        Ok(())
    }

    /// Draw the key row, returning where the "week of" field goes
    fn key(
        &self,
        content: &mut Content,
        spans: &mut Vec<SpanLayout>,
        key: &Rect,
    ) -> Result<Rect, PDFError> {
        let (_, middle) = key.centre();

        let prompt = "Week of:";
        let prompt_w = self.label_width(prompt);
        spans.extend(self.label(prompt, (key.x1 + prompt_w / 2.0, middle), 0.0));
        let field_x = if prompt_w > Pt(0.0) {
            key.x1 + prompt_w + LEGEND_GAP / 2.0
        } else {
            key.x1
        };
        let field = Rect::from_origin(field_x, key.y1, FIELD_WIDTH, KEY_HEIGHT);

        // legend, right-aligned
        let mut cursor = key.x2;
        content
            .stroke_colour(grey(self.options.grid_colour)?)
            .set_line_width((self.options.grid_line / 2.0).into());
        for entry in self.options.legend.iter().rev() {
            let label_w = self.label_width(&entry.label);
            let label_x = cursor - label_w;
            spans.extend(self.label(&entry.label, (label_x + label_w / 2.0, middle), 0.0));

            let swatch_x = if label_w > Pt(0.0) {
                label_x - LEGEND_GAP / 4.0 - SWATCH
            } else {
                label_x - SWATCH
            };
            content
                .fill_colour(grey(entry.grey)?)
                .rect_path(&Rect::from_origin(
                    swatch_x,
                    middle - SWATCH / 2.0,
                    SWATCH,
                    SWATCH,
                ))
                .fill_nonzero_and_stroke();
            cursor = swatch_x - LEGEND_GAP;
        }

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render(
        options: &TodoOptions,
        namer: &mut FieldNamer,
    ) -> Result<(Document, Id<Page>), PDFError> {
        let mut doc = Document::default();
        let id = todo(
            &mut doc,
            &Resources::default(),
            options,
            namer,
            &mut StdRng::seed_from_u64(11),
        )?;
        Ok((doc, id))
    }

    #[test]
    fn weekend_columns() {
        assert_eq!(day_labels(true, false).len(), 8);
        assert_eq!(day_labels(true, true).last(), Some(&"Weekend"));
        assert_eq!(day_labels(false, true).last(), Some(&"Notes"));
        assert_eq!(day_labels(false, false).len(), 6);
    }

    #[test]
    fn full_page_is_landscape_with_one_field() {
        let mut namer = FieldNamer::new("week");
        let options = TodoOptions {
            items: vec!["Groceries".into(), "Exercise".into()],
            rainbow: true,
            ..Default::default()
        };
        let (doc, id) = render(&options, &mut namer).unwrap();
        let page = &doc.pages[id];
        assert!(page.width() > page.height());
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].name, "week0");
        assert_eq!(page.fields[0].rect.width(), Pt(100.0));
        assert!(doc.form_xobjects.iter().next().is_none());
    }

    #[test]
    fn half_page_places_one_form_twice() {
        let mut namer = FieldNamer::new("week");
        let options = TodoOptions {
            half_page: true,
            booklet: true,
            ..Default::default()
        };
        let (doc, id) = render(&options, &mut namer).unwrap();
        let page = &doc.pages[id];
        assert!(page.width() < page.height());
        assert_eq!(doc.form_xobjects.len(), 1);

        let placements = page
            .contents
            .iter()
            .filter(|c| matches!(c, crate::PageContents::FormXObject(_)))
            .count();
        assert_eq!(placements, 2);

        let names: Vec<&str> = page.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["week0", "week1"]);
        assert_eq!(namer.issued(), 2);
    }

    #[test]
    fn long_topics_are_rejected() {
        let options = TodoOptions {
            items: vec!["x".repeat(MAX_TOPIC_LEN + 1)],
            ..Default::default()
        };
        let result = render(&options, &mut FieldNamer::default());
        assert!(matches!(
            result,
            Err(PDFError::TopicTooLong { len: 41, max: 40, .. })
        ));
    }

    #[test]
    fn tiny_pages_do_not_fit() {
        let options = TodoOptions {
            page_size: Paper::Custom {
                width: Pt(100.0),
                height: Pt(100.0),
            },
            ..Default::default()
        };
        let result = render(&options, &mut FieldNamer::default());
        assert!(matches!(result, Err(PDFError::DoesNotFit(_))));
    }

    #[test]
    fn shading_greys_are_validated() {
        let options = TodoOptions {
            shading: vec![vec![0.0, 120.0]],
            ..Default::default()
        };
        let result = render(&options, &mut FieldNamer::default());
        assert!(matches!(result, Err(PDFError::GreyOutOfRange(_))));
    }
}
