use clap::{Parser, ValueEnum};
use labelsheet::{FontSettings, PipelineBuilder, PipelineError, SheetConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Layout {
    /// 2x4 labels, one per order, with the total quantity
    EightUp,
    /// 2x6 labels, one per recipient, with quantities per category
    TwelveUp,
}

impl Layout {
    fn preset(self) -> SheetConfig {
        match self {
            Layout::EightUp => SheetConfig::eight_up(),
            Layout::TwelveUp => SheetConfig::twelve_up(),
        }
    }
}

/// Generate a printable PDF of shipping labels from an order export.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Order export in CSV form
    input: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "shipping_labels.pdf")]
    output: PathBuf,

    /// Label sheet preset
    #[arg(long, value_enum, default_value_t = Layout::EightUp)]
    layout: Layout,

    /// JSON sheet configuration; replaces the preset chosen with --layout
    #[arg(long)]
    config: Option<PathBuf>,

    /// TrueType font to embed for label text, for scripts Helvetica lacks
    #[arg(long)]
    font: Option<PathBuf>,

    /// TrueType font for the heading; defaults to --font
    #[arg(long, requires = "font")]
    bold_font: Option<PathBuf>,

    /// Installed font family to embed when no --font is given
    #[arg(long, conflicts_with = "font")]
    font_family: Option<String>,

    /// Also write the aggregated label records as JSON
    #[arg(long)]
    records_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), PipelineError> {
    let mut builder = match &args.config {
        Some(path) => PipelineBuilder::new().with_config_file(path)?,
        None => PipelineBuilder::new().with_config(args.layout.preset()),
    };
    if let Some(regular) = &args.font {
        builder = builder.with_fonts(FontSettings::from_files(regular, args.bold_font.clone()));
    } else if let Some(family) = &args.font_family {
        builder = builder.with_fonts(FontSettings::from_family(family));
    }
    let pipeline = builder.build()?;

    let sheet = pipeline.generate_to_file(&args.input, &args.output)?;

    if let Some(path) = &args.records_json {
        fs::write(path, serde_json::to_vec_pretty(&sheet.records)?)?;
        log::info!("Wrote label records to {}", path.display());
    }

    println!(
        "Successfully generated {} ({} labels, {} pages)",
        args.output.display(),
        sheet.records.len(),
        sheet.pages
    );
    Ok(())
}
