use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use identex_core::config_file;
use identex_parsing::{EntryExtractor, ParsingConfigBuilder};
use identex_pdf_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;

mod output;
mod settings;

use output::ColorMode;
use settings::Settings;

/// False identity extractor - Turn the catalogue PDF into a structured JSON dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the source PDF (default: content/source.pdf)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path of the JSON dataset to write (default: content/false_identities.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read configuration from this TOML file instead of the usual locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dry run: extract and print entries without writing the dataset
    #[arg(long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => config_file::read_config(path)?,
        None => config_file::load_config(),
    };
    let settings = Settings::resolve(cli.input, cli.output, &config, |key| {
        std::env::var(key).ok()
    });

    if !settings.input.exists() {
        anyhow::bail!("Missing {}", settings.input.display());
    }

    let parsing_config = ParsingConfigBuilder::new()
        .toc_page(settings.toc_page)
        .authoring(settings.authoring.clone())
        .build()?;
    let extractor = EntryExtractor::with_config(parsing_config);

    // The document is closed when the backend goes out of scope
    let result = {
        let backend = MupdfBackend::open(&settings.input)?;
        extractor.extract(&backend)?
    };

    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let mut stdout = std::io::stdout().lock();

    if cli.dry_run {
        let file_name = settings
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| settings.input.display().to_string());
        output::print_dry_run(&mut stdout, &file_name, &result, color)?;
        return Ok(());
    }

    output::write_dataset(&settings.output, &result.dataset)?;
    tracing::info!(
        path = %settings.output.display(),
        entries = result.dataset.false_identities.len(),
        "dataset written"
    );
    writeln!(stdout, "Wrote {}", settings.output.display())?;
    output::print_summary(&mut stdout, &result.stats, color)?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
