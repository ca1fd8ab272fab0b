//! tmdbcli - command line client for TMDB account endpoints.

/// Account subcommand actions.
mod commands;
/// Application configuration (TOML + environment).
mod config;
/// Man page generation.
mod docs;
/// Response rendering.
mod output;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::commands::Format;
use crate::config::{AppConfig, Overrides, Settings, resolve_config_path};
use tmdbcli_api::account::{AccountClient, MediaKind, PageParams, SortOrder};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "tmdbcli", about, version)]
struct Cli {
    /// TMDB API root (default: <https://api.themoviedb.org/3>).
    #[arg(long, global = true, env = "TMDB_API_ROOT")]
    api_root: Option<Url>,

    /// Account ID (default: "null", resolved by TMDB from the token).
    #[arg(long, global = true, env = "TMDB_ACCOUNT_ID")]
    account_id: Option<String>,

    /// Override config directory.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Query and modify the TMDB account.
    Account(AccountCommand),
    /// Generate man pages for every command.
    Docs(DocsArgs),
    /// Print a shell completion script.
    Completions(CompletionsArgs),
}

/// Arguments for the `docs` subcommand.
#[derive(clap::Args)]
struct DocsArgs {
    /// Output directory (default: a new temporary directory).
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Arguments for the `account` subcommand.
#[derive(clap::Args)]
struct AccountCommand {
    /// Account subcommand to run.
    #[command(subcommand)]
    command: AccountSubcommands,
}

/// Available account subcommands.
#[derive(Subcommand)]
enum AccountSubcommands {
    /// Show account details.
    Details(RawArgs),
    /// Show the account's custom lists.
    Lists(ListsArgs),
    /// Mark or list favorite movies and TV shows.
    Favorite(MarkCommand),
    /// Add to or list the watchlist.
    Watchlist(MarkCommand),
    /// List rated movies, TV shows and episodes.
    Rated(RatedCommand),
}

/// `--raw` flag shared by every account subcommand.
#[derive(clap::Args)]
struct RawArgs {
    /// Print the response as JSON instead of text.
    #[arg(short, long)]
    raw: bool,
}

/// Arguments for the `account lists` subcommand.
#[derive(clap::Args)]
struct ListsArgs {
    /// Page number.
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    #[command(flatten)]
    output: RawArgs,
}

/// Arguments for the `favorite` and `watchlist` subcommands.
#[derive(clap::Args)]
struct MarkCommand {
    /// Subcommand to run.
    #[command(subcommand)]
    command: MarkSubcommands,
}

/// Available `favorite` / `watchlist` subcommands.
#[derive(Subcommand)]
enum MarkSubcommands {
    /// Add (`yes`) or remove (`no`) a movie or TV show.
    Add(MarkArgs),
    /// List movies or TV shows.
    Get(GetArgs),
}

/// Arguments for `favorite add` / `watchlist add`.
#[derive(clap::Args)]
struct MarkArgs {
    /// Media type.
    #[arg(value_enum)]
    media_type: MarkMediaType,

    /// TMDB movie or TV series ID.
    media_id: u64,

    /// Whether to add (`yes`) or remove (`no`).
    #[arg(value_enum)]
    flag: YesNo,

    #[command(flatten)]
    output: RawArgs,
}

/// Arguments for `favorite get`, `watchlist get` and `rated get`.
#[derive(clap::Args)]
struct GetArgs {
    /// Media type.
    #[arg(value_enum)]
    media_type: ListMediaType,

    #[command(flatten)]
    paging: PageArgs,

    #[command(flatten)]
    output: RawArgs,
}

/// Arguments for the `rated` subcommand.
#[derive(clap::Args)]
struct RatedCommand {
    /// Rated subcommand to run.
    #[command(subcommand)]
    command: RatedSubcommands,
}

/// Available `rated` subcommands.
#[derive(Subcommand)]
enum RatedSubcommands {
    /// List rated movies or TV shows.
    Get(GetArgs),
    /// List rated TV episodes.
    GetEps(EpisodesArgs),
}

/// Arguments for `rated get-eps`.
#[derive(clap::Args)]
struct EpisodesArgs {
    #[command(flatten)]
    paging: PageArgs,

    #[command(flatten)]
    output: RawArgs,
}

/// Paging options of collection endpoints.
#[derive(clap::Args)]
struct PageArgs {
    /// Page number.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Response language (default: config `api.language` or "en-US").
    #[arg(long)]
    language: Option<String>,

    /// Sort order.
    #[arg(long, value_enum, default_value_t = SortArg::CreatedAtAsc)]
    sort_by: SortArg,
}

/// Media type accepted by `add`.
#[derive(Clone, Copy, ValueEnum)]
enum MarkMediaType {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
}

/// Media type accepted by `get`.
#[derive(Clone, Copy, ValueEnum)]
enum ListMediaType {
    /// Movies.
    Movies,
    /// TV series.
    Tv,
}

/// Add/remove switch.
#[derive(Clone, Copy, ValueEnum)]
enum YesNo {
    /// Add.
    Yes,
    /// Remove.
    No,
}

/// Sort order of collection endpoints.
#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// Oldest additions first.
    #[value(name = "created_at.asc")]
    CreatedAtAsc,
    /// Newest additions first.
    #[value(name = "created_at.desc")]
    CreatedAtDesc,
}

impl From<MarkMediaType> for MediaKind {
    fn from(value: MarkMediaType) -> Self {
        match value {
            MarkMediaType::Movie => Self::Movie,
            MarkMediaType::Tv => Self::Tv,
        }
    }
}

impl From<ListMediaType> for MediaKind {
    fn from(value: ListMediaType) -> Self {
        match value {
            ListMediaType::Movies => Self::Movie,
            ListMediaType::Tv => Self::Tv,
        }
    }
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::CreatedAtAsc => Self::CreatedAtAsc,
            SortArg::CreatedAtDesc => Self::CreatedAtDesc,
        }
    }
}

impl YesNo {
    const fn as_bool(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl PageArgs {
    /// Builds request parameters, falling back to `default_language`.
    fn to_params(&self, default_language: &str) -> PageParams {
        PageParams::new()
            .language(self.language.as_deref().unwrap_or(default_language))
            .page(self.page)
            .sort_by(self.sort_by.into())
    }
}

/// Resolves settings from flags, environment and the config file.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or no token is available.
#[instrument(skip_all)]
fn load_settings(cli: &Cli) -> Result<Settings> {
    let config_path = resolve_config_path(cli.config_dir.as_deref())?;
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded config");

    let overrides = Overrides {
        api_root: cli.api_root.clone(),
        account_id: cli.account_id.clone(),
        token: std::env::var("TMDB_API_TOKEN").ok(),
        auth_token: std::env::var("AUTH_TOKEN").ok(),
    };
    Settings::resolve(overrides, config)
}

/// Builds an `AccountClient` from resolved settings.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
fn build_account_client(settings: &Settings) -> Result<AccountClient> {
    AccountClient::builder()
        .base_url(settings.api_root.clone())
        .api_token(settings.token.as_str())
        .account_id(settings.account_id.as_str())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB account client")
}

/// Runs an `account` subcommand against TMDB, writing to stdout.
///
/// # Errors
///
/// Returns an error if settings resolution, the API request or the write fails.
#[instrument(skip_all)]
async fn run_account(cli: &Cli, command: &AccountSubcommands) -> Result<()> {
    let settings = load_settings(cli)?;
    let client = build_account_client(&settings)?;
    let language = settings.language.as_str();
    let mut out = io::stdout().lock();

    match command {
        AccountSubcommands::Details(args) => {
            commands::run_details(&client, &mut out, Format::from_raw_flag(args.raw)).await
        }
        AccountSubcommands::Lists(args) => {
            let format = Format::from_raw_flag(args.output.raw);
            commands::run_lists(&client, &mut out, args.page, format).await
        }
        AccountSubcommands::Favorite(cmd) => match &cmd.command {
            MarkSubcommands::Add(args) => {
                commands::run_add_favorite(
                    &client,
                    &mut out,
                    args.media_type.into(),
                    args.media_id,
                    args.flag.as_bool(),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
            MarkSubcommands::Get(args) => {
                commands::run_favorites(
                    &client,
                    &mut out,
                    args.media_type.into(),
                    &args.paging.to_params(language),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
        },
        AccountSubcommands::Watchlist(cmd) => match &cmd.command {
            MarkSubcommands::Add(args) => {
                commands::run_add_to_watchlist(
                    &client,
                    &mut out,
                    args.media_type.into(),
                    args.media_id,
                    args.flag.as_bool(),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
            MarkSubcommands::Get(args) => {
                commands::run_watchlist(
                    &client,
                    &mut out,
                    args.media_type.into(),
                    &args.paging.to_params(language),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
        },
        AccountSubcommands::Rated(cmd) => match &cmd.command {
            RatedSubcommands::Get(args) => {
                commands::run_rated(
                    &client,
                    &mut out,
                    args.media_type.into(),
                    &args.paging.to_params(language),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
            RatedSubcommands::GetEps(args) => {
                commands::run_rated_episodes(
                    &client,
                    &mut out,
                    &args.paging.to_params(language),
                    Format::from_raw_flag(args.output.raw),
                )
                .await
            }
        },
    }
}

/// Writes a completion script for `shell` to stdout.
fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_owned();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Loads `.env` from the working directory when present.
fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        tracing::warn!("failed to load .env: {e}");
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    load_dotenv();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Account(cmd) => run_account(&cli, &cmd.command).await,
        Commands::Docs(args) => {
            docs::run_docs(Cli::command(), args.dir.as_deref(), &mut io::stdout().lock())?;
            Ok(())
        }
        Commands::Completions(args) => {
            print_completions(args.shell);
            Ok(())
        }
    }
}
