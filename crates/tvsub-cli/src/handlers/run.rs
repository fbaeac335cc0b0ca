//! `tvsub run` handler.

use std::path::Path;

use anyhow::Result;

use crate::presentation::print_run_summary;
use crate::scheduler::Scheduler;

/// Execute the run command.
///
/// With `once`, processes the watch-list and prints a summary. Otherwise
/// runs until Ctrl-C.
pub async fn execute(config_path: &Path, once: bool, only: &[String]) -> Result<()> {
    let scheduler = Scheduler::new(config_path);

    if once {
        let summary = scheduler.run_once(only).await?;
        print_run_summary(&summary);
        return Ok(());
    }

    println!("tvsub running, press Ctrl+C to exit");
    scheduler.run_forever(only).await?;
    Ok(())
}
