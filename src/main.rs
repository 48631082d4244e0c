use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use reqwest::Client;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod config;
mod images;

use api::client::VendorClient;
use api::VendorApi;
use cli::print::OutputFormat;
use cli::{channel_image, release_image};
use images::{AppContext, ImageListOptions};

#[derive(Parser, Debug)]
#[command(name = "replicated", author, version, about, long_about = None)]
pub struct Cli {
    /// App ID or slug to operate on
    #[arg(long, global = true, env = "REPLICATED_APP")]
    app: Option<String>,
    /// Credentials profile from ~/.replicated/config.json
    #[arg(long, global = true)]
    profile: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Channel commands
    #[command(subcommand)]
    Channel(ChannelCommands),
    /// Release commands
    #[command(subcommand)]
    Release(ReleaseCommands),
}

#[derive(Subcommand, Debug)]
enum ChannelCommands {
    /// Manage channel images
    #[command(subcommand)]
    Image(ImageCommands),
}

#[derive(Subcommand, Debug)]
enum ReleaseCommands {
    /// Manage release images
    #[command(subcommand)]
    Image(ImageCommands),
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// List images in a channel's current or specified release
    #[command(visible_alias = "list")]
    Ls(ImageLsArgs),
}

#[derive(Args, Debug)]
struct ImageLsArgs {
    /// The channel name, slug, or ID
    #[arg(long)]
    channel: String,
    /// Semver of the release to list (defaults to the current release)
    #[arg(long)]
    version: Option<String>,
    /// Keep the proxy registry domain in image names instead of stripping it
    #[arg(long)]
    keep_proxy: bool,
    /// Only print each image once
    #[arg(long)]
    unique: bool,
    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::List)]
    output: OutputFormat,
}

impl ImageLsArgs {
    fn options(&self) -> ImageListOptions {
        ImageListOptions {
            channel: self.channel.clone(),
            version: self.version.clone().unwrap_or_default(),
            keep_proxy: self.keep_proxy,
            unique: self.unique,
        }
    }
}

/// Resolve the `--app` selection to an explicit context
async fn resolve_app(api: &dyn VendorApi, app: Option<&str>) -> Result<AppContext> {
    let app = app
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| anyhow::anyhow!("no app specified"))?;

    let app = api
        .get_app(app)
        .await
        .with_context(|| format!("Failed to get app {:?}", app))?;

    let context = AppContext {
        app_type: app.app_type(),
        id: app.id,
        slug: app.slug,
    };
    debug!(app_id = %context.id, app_type = %context.app_type, "Using app");

    Ok(context)
}

fn env_var_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::Config::load()?;
    let credentials = config.resolve_credentials(
        cli.profile.as_deref(),
        env_var_non_empty(config::API_TOKEN_ENV).as_deref(),
        env_var_non_empty(config::API_ORIGIN_ENV).as_deref(),
    )?;
    debug!(
        api_origin = %credentials.api_origin,
        profile = ?credentials.profile,
        "Loaded credentials"
    );

    let http_client = Client::new();
    let api = VendorClient::new(
        http_client,
        &credentials.api_origin,
        &credentials.api_token,
    );
    let app = resolve_app(&api, cli.app.as_deref()).await?;

    match &cli.command {
        Commands::Channel(ChannelCommands::Image(ImageCommands::Ls(args))) => {
            channel_image::channel_image_ls(&api, &app, &args.options(), args.output).await?;
        }
        Commands::Release(ReleaseCommands::Image(ImageCommands::Ls(args))) => {
            release_image::release_image_ls(&api, &app, &args.options(), args.output).await?;
        }
    }

    Ok(())
}
