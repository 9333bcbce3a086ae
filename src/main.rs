use anyhow::Context;
use clap::Parser;
use cli::args::{GivesheetArgs, TemplateCommand};
use cli::logger::Logger;
use givesheet::templates::{self, Resources};
use givesheet::{Document, FieldNamer, Font, Image};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

mod cli;

fn read_params<T: DeserializeOwned + Default>(path: Option<&Path>) -> anyhow::Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read parameter file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("unable to parse parameter file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = GivesheetArgs::parse();
    Logger::init(args.verbose)?;

    let common = args.command.args();
    let mut rng = match common.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut doc = Document::default();
    let mut resources = Resources::default();
    if let Some(path) = &common.font {
        let bytes = std::fs::read(path)
            .with_context(|| format!("unable to read font {}", path.display()))?;
        let font = Font::load(bytes)?;
        log::info!(
            "labels in {}",
            font.name().unwrap_or_else(|| path.display().to_string())
        );
        resources.font = Some(doc.add_font(font));
    }
    if let Some(path) = &common.logo {
        let logo = Image::new_from_disk(path)
            .with_context(|| format!("unable to load logo {}", path.display()))?;
        resources.logo = Some(doc.add_image(logo));
    }

    let params = common.params_path.as_deref();
    match &args.command {
        TemplateCommand::Cartesian(_) => {
            templates::cartesian(&mut doc, &resources, &read_params(params)?, &mut rng)?;
        }
        TemplateCommand::Dotted(_) => {
            templates::dotted(&mut doc, &resources, &read_params(params)?, &mut rng)?;
        }
        TemplateCommand::Lined(_) => {
            templates::lined(&mut doc, &resources, &read_params(params)?, &mut rng)?;
        }
        TemplateCommand::Todo(_) => {
            let mut namer = FieldNamer::new("week");
            templates::todo(
                &mut doc,
                &resources,
                &read_params(params)?,
                &mut namer,
                &mut rng,
            )?;
        }
    }

    let file = File::create(&common.out)
        .with_context(|| format!("unable to create {}", common.out.display()))?;
    let mut out = BufWriter::new(file);
    doc.write(&mut out)?;
    out.flush()?;
    log::info!("wrote {}", common.out.display());
    Ok(())
}
