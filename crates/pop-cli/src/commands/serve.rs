//! Serve command implementation
//!
//! Starts the query service and loads the CSV file alongside it. Requests
//! answered before ingestion finishes see the rows stored so far. An
//! ingestion failure ends the process.

use anyhow::{Context, Result};
use pop_api::ApiState;
use pop_db::load_csv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::{apply_source_args, load_config, open_store};

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    apply_source_args(&mut config, &args.source);
    config.validate().context("Invalid configuration")?;

    let store = open_store(&config)?;
    let state = Arc::new(ApiState::new(Arc::clone(&store), config.countries.clone()));
    log::debug!("Serving countries: {}", state.countries().join(", "));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    let server = tokio::spawn(pop_api::serve(listener, state));

    if args.skip_ingest {
        log::info!("Skipping CSV ingestion");
    } else {
        let csv_path = Path::new(&config.csv_path);
        load_csv(store.as_ref(), csv_path)
            .await
            .with_context(|| format!("Failed to ingest {}", csv_path.display()))?;
    }

    tokio::select! {
        result = server => {
            result
                .context("Server task failed")?
                .context("HTTP server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Shutting down");
        }
    }

    Ok(())
}
