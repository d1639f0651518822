//! Migrate command implementation

use anyhow::{Context, Result};
use mg_engine::{CancelFlag, Engine, RunOutcome};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::context::Settings;

/// Execute the migrate command
pub(crate) async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let root = settings.migrations_dir()?;
    let database = settings.database()?;

    let cancel = CancelFlag::new();
    let mut options = settings.engine_options(cancel.clone());
    if args.no_lock {
        options.lock = false;
    }

    let engine = Engine::connect(database, root, options).await?;
    if global.verbose {
        eprintln!(
            "[verbose] Migrating {} database from {}",
            engine.database().db_type(),
            root.display()
        );
    }

    let interrupts = tokio::spawn(watch_interrupts(cancel));
    let result = engine.run().await;
    interrupts.abort();

    match result.context("Migration run failed")? {
        RunOutcome::UpToDate => println!("Migrations up to date"),
        RunOutcome::Applied { applied } => {
            for name in &applied {
                println!("  applied {name}");
            }
            println!("\nApplied {} migration(s)", applied.len());
        }
    }
    Ok(())
}

/// Exit status for a run aborted by a second interrupt
const ABORT_EXIT_CODE: i32 = 130;

/// What an interrupt does to the run in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    /// Stop before the next migration and roll back
    StopAfterCurrent,
    /// Exit immediately without committing
    AbortNow,
}

fn on_interrupt(cancel: &CancelFlag) -> Interrupt {
    if cancel.is_cancelled() {
        Interrupt::AbortNow
    } else {
        cancel.cancel();
        Interrupt::StopAfterCurrent
    }
}

/// First Ctrl-C cancels between migrations. A second one exits the process
/// mid-statement; the uncommitted transaction dies with the connection.
async fn watch_interrupts(cancel: CancelFlag) {
    while tokio::signal::ctrl_c().await.is_ok() {
        match on_interrupt(&cancel) {
            Interrupt::StopAfterCurrent => log::warn!(
                "Interrupt received; rolling back once the current migration finishes. \
                 Press Ctrl-C again to abort now"
            ),
            Interrupt::AbortNow => {
                eprintln!("Migration run aborted by interrupt");
                std::process::exit(ABORT_EXIT_CODE);
            }
        }
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
