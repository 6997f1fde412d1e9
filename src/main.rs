use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod classify;
mod config;
mod export;
mod fallback;
mod models;
mod poll;
mod report;
mod sort;
mod source;
#[cfg(test)]
mod test_support;

use config::Settings;
use poll::Poller;
use sort::{SortField, SortState};
use source::{AlertsFeed, DataSource, DetectFeed, Feed, StatusFeed};

#[derive(Parser)]
#[command(name = "sentinelx-dashboard")]
#[command(about = "Terminal dashboard for the SentinelX hazard detection backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current hazard with recommended actions
    Dashboard {
        #[arg(long)]
        watch: bool,
    },
    /// Follow detections as they arrive until interrupted
    Live,
    /// Unresolved alerts with their checklists
    Alerts {
        #[arg(long)]
        watch: bool,
    },
    /// Alert history table
    History {
        /// Column to sort by; repeating a column flips its order
        #[arg(long = "sort", value_enum)]
        sort: Vec<SortField>,
        /// Also write the sorted table to a CSV file
        #[arg(long, conflicts_with = "watch")]
        csv: Option<PathBuf>,
        #[arg(long)]
        watch: bool,
    },
    /// Backend monitoring status
    System {
        #[arg(long)]
        watch: bool,
    },
    /// Print the recommended checklist for a hazard type
    Actions { hazard_type: String },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
        format!("{app_name}={level}").into()
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a feed once, or on every refresh until Ctrl-C when `watch` is set.
async fn run_view<F, R>(settings: &Settings, watch: bool, render: R) -> anyhow::Result<()>
where
    F: Feed,
    R: Fn(&F::Payload) -> String,
{
    let source = DataSource::<F>::from_settings(settings)?;

    if !watch {
        let acquired = source
            .acquire()
            .await
            .with_context(|| format!("failed to load {}", source.url()))?;
        print!("{}", render(&acquired.payload));
        return Ok(());
    }

    let poller = Poller::spawn(source, settings.poll_interval());
    let mut updates = poller.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let output = {
                    let state = updates.borrow_and_update();
                    tracing::debug!(
                        feed = F::NAME,
                        origin = ?state.origin,
                        updated_at = ?state.updated_at,
                        loading = state.loading,
                        error = ?state.last_error,
                        "view refreshed"
                    );
                    state.data.as_ref().map(&render)
                };
                if let Some(output) = output {
                    println!("{output}");
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, stopping");
                break;
            }
        }
    }

    poller.stop();
    Ok(())
}

async fn run_live(settings: &Settings) -> anyhow::Result<()> {
    println!("Video stream: {}", settings.endpoint("/video"));

    run_view::<DetectFeed, _>(settings, true, |snapshot| {
        report::render_feed_line(snapshot.as_ref(), &Utc::now())
    })
    .await
}

async fn run_history(
    settings: &Settings,
    sort: &[SortField],
    csv: Option<PathBuf>,
    watch: bool,
) -> anyhow::Result<()> {
    let mut state = SortState::default();
    for field in sort {
        state.select(*field);
    }

    if let Some(path) = csv {
        let source = DataSource::<AlertsFeed>::from_settings(settings)?;
        let acquired = source
            .acquire()
            .await
            .with_context(|| format!("failed to load {}", source.url()))?;
        let sorted = state.apply(&acquired.payload);
        print!("{}", report::render_history(&sorted, &state));
        let written = export::write_history_csv(&path, &sorted)?;
        println!("Wrote {written} alerts to {}.", path.display());
        return Ok(());
    }

    run_view::<AlertsFeed, _>(settings, watch, |records| {
        report::render_history(&state.apply(records), &state)
    })
    .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.settings.log_level);
    let settings = cli.settings;

    match cli.command {
        Commands::Dashboard { watch } => {
            run_view::<DetectFeed, _>(&settings, watch, |snapshot| {
                report::render_dashboard(snapshot.as_ref())
            })
            .await?;
        }
        Commands::Live => run_live(&settings).await?,
        Commands::Alerts { watch } => {
            run_view::<AlertsFeed, _>(&settings, watch, |records| {
                report::render_alerts(records, &settings)
            })
            .await?;
        }
        Commands::History { sort, csv, watch } => {
            run_history(&settings, &sort, csv, watch).await?;
        }
        Commands::System { watch } => {
            run_view::<StatusFeed, _>(&settings, watch, report::render_system).await?;
        }
        Commands::Actions { hazard_type } => {
            print!("{}", report::render_actions(&hazard_type));
        }
    }

    Ok(())
}
