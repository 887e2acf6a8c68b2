use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rag_chunk::client::render::render;
use rag_chunk::client::{Controller, HttpChunkApi, Notifier, Outcome, SelectedFile};
use rag_chunk::config::AppConfig;

/// Upload a PDF to a rag-chunk server and show how a strategy chunks it.
#[derive(Debug, Parser)]
#[command(name = "chunk-client", version)]
struct Args {
    /// PDF to upload.
    file: Option<PathBuf>,

    /// API base URL; defaults to `client.base_url` from the config files.
    #[arg(long)]
    base_url: Option<String>,

    /// Strategy key; defaults to the first one the server lists.
    #[arg(short, long)]
    strategy: Option<String>,

    /// Parameter override, e.g. `--param size=200`. Repeatable.
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// List the available strategies and exit.
    #[arg(long)]
    list: bool,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!("alert: {message}");
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let base_url = match args.base_url {
        Some(url) => url,
        None => {
            AppConfig::load()
                .context("Failed to load configuration (pass --base-url to skip it)")?
                .client
                .base_url
        }
    };

    let api = HttpChunkApi::new(&base_url).context("Invalid base URL")?;
    let mut controller = Controller::new(api, StderrNotifier);
    controller.load_strategies().await;

    if args.list {
        for (key, strategy) in controller.strategies().iter() {
            println!("{key}: {} - {}", strategy.name, strategy.explanation);
            for (name, default) in strategy.params.iter() {
                println!("    {name} = {default}");
            }
        }
        return Ok(());
    }

    if let Some(strategy) = &args.strategy {
        controller.select_strategy(strategy);
        if controller.page().selected_strategy.is_none() {
            bail!("Unknown strategy '{strategy}'");
        }
    }
    for (name, value) in &args.params {
        if !controller.set_param(name, value) {
            bail!("The selected strategy has no parameter '{name}'");
        }
    }

    let Some(path) = args.file else {
        bail!("No file given");
    };
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_string());
    controller.select_file(SelectedFile { name, bytes });

    if controller.submit_upload().await? == Outcome::Rendered {
        controller.click_chunk().await?;
    }

    print!("{}", render(controller.page()));
    Ok(())
}
