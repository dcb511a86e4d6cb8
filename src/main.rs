use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use twitter_to_cms::hyper::Client;
use twitter_to_cms::{parse_status_id, Config, Progress};

/// Converts a Twitter thread into an HTML fragment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding the OAuth credentials.
    #[arg(short, long, value_name = "FILE", default_value = "credential.json")]
    config: PathBuf,
    /// Where to write the HTML. Defaults to standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Also download the media of the thread into this zip file.
    #[arg(short, long, value_name = "ZIP")]
    media: Option<PathBuf>,
    /// Directory of the media inside the zip file.
    #[arg(long, value_name = "DIR", requires = "media")]
    media_dir: Option<String>,
    /// ID or URL of the last Tweet of the thread.
    #[arg(value_name = "TWEET")]
    tweet: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let leaf = parse_status_id(&cli.tweet)
        .ok_or_else(|| anyhow!("`{}` is neither a Tweet ID nor a Tweet URL", cli.tweet))?;

    let config = Config::from_path(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let client = Client::https(&config);

    let user = client
        .verify_credentials()
        .await
        .context("failed to verify the credentials")?;
    tracing::info!("Authenticated as @{}", user.screen_name);

    let progress = Progress::new();
    let doc = client.spawn_thread(leaf, progress.clone()).await?;
    let html = doc.render_local(&progress)?;

    match cli.output {
        Some(ref path) => fs::write(path, &html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    if let Some(path) = cli.media {
        client
            .spawn_archive(doc.into_chain(), path, cli.media_dir, progress)
            .await?;
    }

    Ok(())
}
