//! Status command implementation

use anyhow::{Context, Result};
use mg_engine::{CancelFlag, Engine};

use crate::cli::{GlobalArgs, StatusArgs};
use crate::context::Settings;

/// Execute the status command
pub(crate) async fn execute(_args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let root = settings.migrations_dir()?;
    let database = settings.database()?;

    let engine = Engine::connect(database, root, settings.engine_options(CancelFlag::new())).await?;
    let plan = engine.plan().await.context("Failed to read migration status")?;

    for name in &plan.applied {
        println!("[applied] {name}");
    }
    for name in &plan.pending {
        println!("[pending] {name}");
    }

    println!();
    match &plan.marker {
        Some(marker) => println!("Last applied: {marker}"),
        None => println!("Last applied: (none)"),
    }
    if plan.is_up_to_date() {
        println!("Migrations up to date");
    } else {
        println!("{} pending migration(s)", plan.pending.len());
    }
    Ok(())
}
