use clap::{Parser, Subcommand};
use cli::{default_config_toml, load_config};
use color_eyre::eyre::Result;
use shape_kit::{AlphaLumaSegmenter, DetectionConfig, Detector, Segmenter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect shapes in an image and print the result as JSON
    Detect {
        /// Path to the input image (any format the image crate decodes)
        #[arg(short, long)]
        input: PathBuf,
        /// Detection config file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Also write the detections as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Also write the binary foreground mask as an image
        #[arg(long)]
        mask: Option<PathBuf>,
        /// Analyse components in parallel (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },
    /// Print the JSON schema of the detection config
    ConfigSchema,
    /// Print the default detection config as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Detect {
            input,
            config,
            geojson,
            mask,
            parallel,
        } => {
            detect(input, config.as_deref(), geojson.as_deref(), mask.as_deref(), *parallel)?;
        }
        Commands::ConfigSchema => {
            println!("{}", serde_json::to_string_pretty(&DetectionConfig::schema())?);
        }
        Commands::DefaultConfig => {
            print!("{}", default_config_toml()?);
        }
    }

    Ok(())
}

fn detect(
    input: &Path,
    config_path: Option<&Path>,
    geojson_path: Option<&Path>,
    mask_path: Option<&Path>,
    parallel: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_config(path)?,
        None => DetectionConfig::default(),
    };
    config.parallel |= parallel;

    info!("Loading image {:?}", input);
    let image = image::open(input)?.to_rgba8();

    let detector = Detector::builder()
        .with_config(config)
        .with_tracing()
        .try_build()?;
    info!("{}", detector.info());

    let result = detector.detect(&image);

    if let Some(path) = mask_path {
        let mask = AlphaLumaSegmenter::from(detector.config().segmentation).segment(&image);
        mask.to_luma_image().save(path)?;
        info!("Wrote mask to {:?}", path);
    }

    if let Some(path) = geojson_path {
        result.save_geojson(path)?;
        info!("Wrote GeoJSON to {:?}", path);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
