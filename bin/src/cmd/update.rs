//! Update command implementation.

use std::collections::BTreeSet;

use anyhow::Result;
use barometer::pipeline::to_record;
use barometer::{Pipeline, PipelineConfig};
use tracing::info;

use super::print_record;

/// Run the daily update, or only print the snapshot on a dry run.
pub(crate) async fn run_update(config: PipelineConfig, dry_run: bool) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    info!(config = ?config, "starting update");
    let pipeline = Pipeline::from_config(config)?;

    if dry_run {
        let (snapshot, dropped) = pipeline.snapshot(today).await?;
        report_dropped(&dropped);
        print_record(&to_record(&snapshot));
        println!("Dry run: artifact not written.");
        return Ok(());
    }

    let report = pipeline.run(today).await?;
    report_dropped(&report.dropped);
    print_record(&report.record);
    println!(
        "{:?} record for {} in {} ({} records)",
        report.outcome,
        report.record.date(),
        pipeline.config().artifact_path.display(),
        report.history_len
    );
    Ok(())
}

fn report_dropped(dropped: &BTreeSet<String>) {
    if !dropped.is_empty() {
        let names: Vec<&str> = dropped.iter().map(String::as_str).collect();
        println!("Degraded: {} unavailable\n", names.join(", "));
    }
}
