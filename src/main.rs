//! bingraph - render binary files as images.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bingraph::config::{
    ConfigFile, EntropyColor, ExportFormat, GenerationConfig, Mode, ProfileStyle,
    DEFAULT_OUTPUT_ZOOM,
};
use bingraph::io::{export, read_window};
use bingraph::util::{format_bytes, parse_hex_offset};

#[derive(Parser, Debug)]
#[command(name = "bingraph", version, about = "Render binary files as images", long_about = None)]
#[command(group(ArgGroup::new("transform").multiple(false)))]
struct Cli {
    /// Input file, `-` for standard input
    #[arg(required_unless_present = "list_modes")]
    input: Option<PathBuf>,

    /// Output file, `-` for standard output
    #[arg(required_unless_present = "list_modes")]
    output: Option<PathBuf>,

    /// Visualization mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Output width in pixels, before zoom
    #[arg(short, long)]
    width: Option<usize>,

    /// Bytes per block for the entropy modes
    #[arg(short, long)]
    block_size: Option<usize>,

    /// Integer scale factor applied on export
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    zoom: Option<u32>,

    /// First byte of the input window (hex)
    #[arg(long, value_parser = parse_hex_offset, default_value = "0")]
    offset_start: u64,

    /// End of the input window (hex, exclusive); 0 reads to the end
    #[arg(long, value_parser = parse_hex_offset, default_value = "0")]
    offset_end: u64,

    /// Group runs of pixels into squares of this side
    #[arg(long, group = "transform", value_name = "SIDE")]
    transform_squares: Option<usize>,

    /// Reverse every odd row
    #[arg(long, group = "transform")]
    transform_zigzag: bool,

    /// Lay pixels out along Hilbert curves of this level
    #[arg(long, group = "transform", value_name = "LEVEL")]
    transform_hilbert: Option<u32>,

    /// Output container
    #[arg(long, value_enum)]
    output_format: Option<ExportFormat>,

    /// Color scheme for the entropy mode
    #[arg(long, value_enum)]
    entropy_color: Option<EntropyColor>,

    /// Line style for the entropy histogram
    #[arg(long, value_enum)]
    profile_style: Option<ProfileStyle>,

    /// Largest input accepted by the dotplot mode, in bytes
    #[arg(long)]
    max_dotplot_len: Option<usize>,

    /// TOML file with default settings; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the available modes and exit
    #[arg(long)]
    list_modes: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Settings given on the command line, layered over the config file.
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            mode: self.mode,
            width: self.width,
            block_size: self.block_size,
            zoom: self.zoom,
            output_format: self.output_format,
            entropy_color: self.entropy_color,
            profile_style: self.profile_style,
            max_dotplot_len: self.max_dotplot_len,
            transform_squares: self.transform_squares,
            transform_zigzag: self.transform_zigzag,
            transform_hilbert: self.transform_hilbert,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn print_modes() {
    let width = Mode::all().iter().map(|m| m.name().len()).max().unwrap_or(0);
    for mode in Mode::all() {
        println!("{:<width$}  {}", mode.name(), mode.description());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        anyhow::bail!("both an input and an output path are required");
    };

    let file = match &cli.config {
        Some(path) => ConfigFile::load(path).context("Failed to load config file")?,
        None => ConfigFile::default(),
    };

    let flags = cli.overrides();

    let mut config = GenerationConfig::default();
    file.apply_to(&mut config);
    flags.apply_to(&mut config);
    let zoom = flags.zoom.or(file.zoom).unwrap_or(DEFAULT_OUTPUT_ZOOM);
    let format = flags.output_format.or(file.output_format).unwrap_or_default();
    debug!(?config, zoom, ?format, "Resolved configuration");

    let bytes = read_window(input, cli.offset_start, cli.offset_end)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let grid = bingraph::render(&bytes, &config).context("Failed to generate image")?;

    export(&grid, format, zoom, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        mode = %config.mode,
        transform = config.transform.name(),
        input = %format_bytes(bytes.len() as u64),
        width = grid.width(),
        height = grid.height(),
        "Done"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_modes {
        print_modes();
        return Ok(());
    }

    run(&cli)
}
