use givesheet::templates::{
    cartesian, dotted, lined, todo, CartesianOptions, DottedOptions, LinedOptions, Resources,
    TodoOptions,
};
use givesheet::{Document, FieldNamer, Image, PDFError};
use image::{DynamicImage, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn write(doc: Document) -> Vec<u8> {
    let mut out = Vec::new();
    doc.write(&mut out).expect("can write document");
    out
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

/// Every flate stream in the file that inflates to text, which covers page and form content
fn content_streams(pdf: &[u8]) -> Vec<String> {
    let mut streams = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream\n") {
        let body = &rest[start + b"stream\n".len()..];
        let Some(end) = find(body, b"\nendstream") else {
            break;
        };
        if let Ok(inflated) = miniz_oxide::inflate::decompress_to_vec_zlib(&body[..end]) {
            if let Ok(text) = String::from_utf8(inflated) {
                streams.push(text);
            }
        }
        rest = &body[end + b"\nendstream".len()..];
    }
    streams
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn assert_balanced(stream: &str) {
    assert!(!stream.contains("Qq"), "fused operators in {stream:?}");
    let ops: Vec<&str> = stream.split_whitespace().collect();
    let saves = ops.iter().filter(|op| **op == "q").count();
    let restores = ops.iter().filter(|op| **op == "Q").count();
    assert_eq!(saves, restores, "unbalanced graphics state in {stream:?}");
}

#[test]
fn every_template_renders_to_pdf() {
    let mut doc = Document::default();
    let resources = Resources::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut namer = FieldNamer::new("week");

    cartesian(&mut doc, &resources, &CartesianOptions::default(), &mut rng).unwrap();
    dotted(&mut doc, &resources, &DottedOptions::default(), &mut rng).unwrap();
    lined(&mut doc, &resources, &LinedOptions::default(), &mut rng).unwrap();
    todo(
        &mut doc,
        &resources,
        &TodoOptions::default(),
        &mut namer,
        &mut rng,
    )
    .unwrap();
    assert_eq!(doc.page_order.len(), 4);

    let out = write(doc);
    assert!(out.starts_with(b"%PDF-"));
    assert!(contains(&out, "/Count 4"));
    assert!(contains(&out, "/AcroForm"));
    assert!(contains(&out, "(Weekly To-Do List)"));
}

#[test]
fn seeded_rainbows_are_reproducible() {
    let render = |seed: u64| {
        let mut doc = Document::default();
        let options = CartesianOptions {
            rainbow: true,
            ..Default::default()
        };
        cartesian(
            &mut doc,
            &Resources::default(),
            &options,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        // the info block carries a timestamp
        doc.info = None;
        write(doc)
    };

    assert_eq!(render(17), render(17));
    assert_ne!(render(17), render(18));
}

#[test]
fn half_page_planner_shares_one_form() {
    let mut doc = Document::default();
    let options = TodoOptions {
        items: vec!["Inbox".to_string(), "Garden".to_string()],
        half_page: true,
        ..Default::default()
    };
    let mut namer = FieldNamer::new("week");
    todo(
        &mut doc,
        &Resources::default(),
        &options,
        &mut namer,
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();

    let out = write(doc);
    assert!(contains(&out, "/Subtype /Form"));
    assert!(contains(&out, "(week0)"));
    assert!(contains(&out, "(week1)"));

    let streams = content_streams(&out);
    // the page places the week form twice
    assert!(streams.iter().any(|s| s.matches("/X0 Do").count() == 2));
    for stream in &streams {
        assert_balanced(stream);
    }
}

#[test]
fn logos_are_embedded() {
    let mut doc = Document::default();
    let logo = doc.add_image(Image::new_raster(DynamicImage::ImageRgba8(
        RgbaImage::from_pixel(32, 16, Rgba([10, 20, 30, 200])),
    )));
    let resources = Resources {
        font: None,
        logo: Some(logo),
    };
    let options = LinedOptions {
        logo_quadrant: 1,
        ..Default::default()
    };
    lined(&mut doc, &resources, &options, &mut StdRng::seed_from_u64(0)).unwrap();

    let out = write(doc);
    assert!(contains(&out, "/Subtype /Image"));
    assert!(contains(&out, "/SMask"));
    for stream in content_streams(&out) {
        assert_balanced(&stream);
    }
}

#[test]
fn bad_quadrants_fail_the_page() {
    let mut doc = Document::default();
    let logo = doc.add_image(Image::new_raster(DynamicImage::ImageRgba8(
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])),
    )));
    let resources = Resources {
        font: None,
        logo: Some(logo),
    };
    let options = DottedOptions {
        logo_quadrant: 0,
        ..Default::default()
    };
    let result = dotted(&mut doc, &resources, &options, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(PDFError::InvalidQuadrant(0))));
}
