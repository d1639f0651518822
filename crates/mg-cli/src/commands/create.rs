//! Create command implementation - scaffolds a new empty migration

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::Settings;

/// Execute the create command
pub(crate) async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let root = settings.migrations_dir()?;

    let label = match &args.name {
        Some(name) => name.clone(),
        None => prompt_for_label()?,
    };

    let timestamp = u64::try_from(chrono::Utc::now().timestamp())
        .context("System clock is set before the Unix epoch")?;
    let dir = mg_core::create_migration(root, &label, timestamp)
        .context("Failed to create migration")?;

    println!("Created migration {}", dir.display());
    Ok(())
}

/// Read a migration label from stdin
fn prompt_for_label() -> Result<String> {
    print!("Enter migration name (spaces in the name are not allowed): ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read migration name")?;
    Ok(line.trim().to_string())
}
