use anyhow::Context;
use clap::Parser;
use memegen::config::Config;
use memegen::logging::init_tracing;
use std::path::PathBuf;

/// Random meme generator: fetch a template, caption it, save it as meme.png.
#[derive(Debug, Parser)]
#[command(name = "memegen", version, about)]
struct Cli {
    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Meme-listing endpoint to query.
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Directory that receives meme.png.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TrueType/OpenType font used for exported captions.
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(endpoint) = self.endpoint {
            config.source.endpoint = endpoint;
        }
        if let Some(dir) = self.output_dir {
            config.export.output_dir = Some(dir);
        }
        if let Some(font) = self.font {
            config.export.font_path = Some(font);
        }
        config
    }
}

fn load_config(cli: Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load().context("loading configuration")?,
    };
    let config = cli.apply(config);
    config.validate()?;
    Ok(config)
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = memegen::ui::run(config) {
        tracing::error!(error = %err, "Terminal session failed");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
