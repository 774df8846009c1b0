//! CLI command implementations

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::MarqueeConfig;
use marquee_search::{CatalogProvider, DemoProvider, RenderState, SearchSession, TmdbProvider};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::display;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title
    Search {
        /// Title or part of a title
        query: String,
    },
    /// List the most popular movies
    Discover,
    /// Type queries line by line and watch the results follow
    Interactive,
}

/// Options shared by every command
pub struct GlobalOptions {
    pub demo: bool,
    pub debounce_ms: Option<u64>,
}

/// Handle the CLI command
///
/// # Errors
/// - Configuration is invalid
/// - Catalog provider cannot be constructed
/// - Reading standard input fails in interactive mode
pub async fn handle_command(
    command: Commands,
    options: GlobalOptions,
) -> anyhow::Result<ExitCode> {
    let config = load_config(&options)?;
    let provider = build_provider(&config, options.demo)?;

    match command {
        Commands::Search { query } => fetch_once(provider, &config, &query).await,
        Commands::Discover => fetch_once(provider, &config, "").await,
        Commands::Interactive => run_interactive(provider, &config).await,
    }
}

fn load_config(options: &GlobalOptions) -> anyhow::Result<MarqueeConfig> {
    let mut config = MarqueeConfig::from_env();

    if let Some(millis) = options.debounce_ms {
        config.search.debounce_quiet = Duration::from_millis(millis);
    }

    config.validate().context("Cannot use catalog configuration")?;
    Ok(config)
}

fn build_provider(
    config: &MarqueeConfig,
    demo: bool,
) -> anyhow::Result<Arc<dyn CatalogProvider>> {
    if demo {
        tracing::info!("Using built-in demo catalog");
        return Ok(Arc::new(DemoProvider::new()));
    }

    if config.catalog.api_key.is_none() {
        tracing::warn!("MARQUEE_API_KEY is not set, catalog requests will be unauthenticated");
    }

    let provider = TmdbProvider::new(&config.catalog).context("Cannot create catalog client")?;
    Ok(Arc::new(provider))
}

/// Fetch once for `query` and print the result
async fn fetch_once(
    provider: Arc<dyn CatalogProvider>,
    config: &MarqueeConfig,
    query: &str,
) -> anyhow::Result<ExitCode> {
    let outcome = provider.fetch_movies(query).await;
    let state = RenderState::from_outcome(query, outcome);

    display::print_state(query, &state, &config.catalog.image_base_url);

    Ok(match state {
        RenderState::Ready { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Run a search session fed by standard input, one query per line
async fn run_interactive(
    provider: Arc<dyn CatalogProvider>,
    config: &MarqueeConfig,
) -> anyhow::Result<ExitCode> {
    let session = SearchSession::start(config, provider);
    let mut render = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a movie title and press enter; an empty line lists popular movies.");
    println!("{:-<60}", "");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read standard input")? {
                    Some(line) => session.set_query(line.trim_end_matches('\r')),
                    None => break,
                }
            }
            changed = render.changed() => {
                if changed.is_err() {
                    break;
                }
                print_latest(&session, &mut render, config);
            }
        }
    }

    // Input is done; let the last query through the debouncer before exiting
    let settled = {
        let pending = session.wait_for_pending_query();
        tokio::pin!(pending);
        loop {
            tokio::select! {
                settled = &mut pending => break settled,
                changed = render.changed() => {
                    if changed.is_err() {
                        break session.wait_until_settled().await;
                    }
                    print_latest(&session, &mut render, config);
                }
            }
        }
    };
    if render.has_changed().unwrap_or(false) {
        print_latest(&session, &mut render, config);
    }

    session.shutdown().await;
    Ok(match settled {
        Ok(RenderState::Ready { .. }) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn print_latest(
    session: &SearchSession,
    render: &mut watch::Receiver<RenderState>,
    config: &MarqueeConfig,
) {
    let state = render.borrow_and_update().clone();
    display::print_state(
        &session.debounced_query(),
        &state,
        &config.catalog.image_base_url,
    );
}
