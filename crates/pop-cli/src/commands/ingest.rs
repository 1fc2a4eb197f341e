//! Ingest command implementation

use anyhow::{Context, Result};
use pop_db::load_csv;
use std::path::Path;

use crate::cli::{GlobalArgs, IngestArgs};
use crate::commands::common::{apply_source_args, load_config, open_store};

/// Execute the ingest command
pub async fn execute(args: &IngestArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_source_args(&mut config, &args.source);
    config.validate().context("Invalid configuration")?;

    let store = open_store(&config)?;
    let csv_path = Path::new(&config.csv_path);
    let summary = load_csv(store.as_ref(), csv_path)
        .await
        .with_context(|| format!("Failed to ingest {}", csv_path.display()))?;
    let total = store.count().await.context("Failed to count stored rows")?;

    println!(
        "Loaded {} rows from {} ({} rows stored)",
        summary.rows,
        csv_path.display(),
        total
    );
    Ok(())
}
