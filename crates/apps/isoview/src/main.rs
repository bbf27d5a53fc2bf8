mod config;
mod error;
mod page;
mod routes;
mod sessions;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use formats::read_pois;
use foundation::GeoBounds;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command, ViewerConfig};
use crate::routes::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.config.validate() {
        error!("invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::Check => run_check(&cli.config),
    }
}

async fn serve(config: ViewerConfig) -> ExitCode {
    let addr = config.addr;
    let state = AppState::new(config);
    if state.catalog.is_empty() {
        error!("no centers configured");
        return ExitCode::FAILURE;
    }
    for entry in state.catalog.entries() {
        info!("center {:?} -> {}", entry.name, entry.path.display());
    }

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(Instant::now());
            if evicted > 0 {
                info!("evicted {evicted} idle sessions ({} live)", sessions.len());
            }
        }
    });

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("isochrone viewer listening on http://{addr}");
    if let Err(err) = axum::serve(listener, routes::router(state)).await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Load every configured file once and print what a render would see.
fn run_check(config: &ViewerConfig) -> ExitCode {
    let catalog = config.catalog();
    let mut failed = false;
    let mut extent: Option<GeoBounds> = None;

    for entry in catalog.entries() {
        let Some(loaded) = catalog.load(&entry.name) else {
            continue;
        };
        match loaded {
            Ok(set) => {
                let start = set.start_point();
                println!(
                    "{}: {} polygons, contours {}..{} min, start ({:.5}, {:.5}), slider 1..{}",
                    entry.name,
                    set.len(),
                    set.min_contour(),
                    set.max_contour(),
                    start.lat,
                    start.lon,
                    set.max_minutes()
                );
                extent = widen(extent, set.bounds());
            }
            Err(err) => {
                println!("{}: {err}", entry.name);
                failed = true;
            }
        }
    }

    for (label, path) in [
        ("schools", config.schools_path()),
        ("hospitals", config.hospitals_path()),
    ] {
        match read_pois(&path) {
            Ok(set) => {
                println!("{label}: {} points", set.len());
                extent = widen(extent, set.bounds());
            }
            Err(err) => {
                println!("{label}: {err}");
                failed = true;
            }
        }
    }

    if let Some(bounds) = extent {
        println!(
            "data extent: lon {:.5}..{:.5}, lat {:.5}..{:.5}",
            bounds.min[0], bounds.max[0], bounds.min[1], bounds.max[1]
        );
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn widen(extent: Option<GeoBounds>, bounds: Option<GeoBounds>) -> Option<GeoBounds> {
    match (extent, bounds) {
        (Some(acc), Some(bounds)) => Some(acc.union(&bounds)),
        (acc, bounds) => acc.or(bounds),
    }
}
