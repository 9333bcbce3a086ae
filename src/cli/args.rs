use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct GivesheetArgs {
    #[command(subcommand)]
    pub command: TemplateCommand,

    /// Log more; repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// Square graph paper
    Cartesian(TemplateArgs),
    /// Dot grid paper
    Dotted(TemplateArgs),
    /// Lined paper
    Lined(TemplateArgs),
    /// Weekly to-do planner
    Todo(TemplateArgs),
}

impl TemplateCommand {
    pub fn args(&self) -> &TemplateArgs {
        match self {
            TemplateCommand::Cartesian(args)
            | TemplateCommand::Dotted(args)
            | TemplateCommand::Lined(args)
            | TemplateCommand::Todo(args) => args,
        }
    }
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// JSON file with template options; anything left out takes its default
    pub params_path: Option<PathBuf>,

    /// Where to write the PDF
    #[clap(long, short)]
    pub out: PathBuf,

    /// Seed for rainbow colouring, for reproducible output
    #[clap(long)]
    pub seed: Option<u64>,

    /// TrueType or OpenType font for labels
    #[clap(long)]
    pub font: Option<PathBuf>,

    /// Image to stamp into a margin
    #[clap(long)]
    pub logo: Option<PathBuf>,
}
