//! Seed command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::{GlobalArgs, SeedArgs};
use crate::context::Settings;

/// Execute the seed command
pub(crate) async fn execute(args: &SeedArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let database = settings.database()?;

    let path = Path::new(&args.path);
    let sql = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let db = mg_db::connect(database)
        .await
        .context("Failed to connect to database")?;

    db.begin().await.context("Failed to open transaction")?;
    if let Err(e) = db.execute_batch(&sql).await {
        if let Err(rollback_err) = db.rollback().await {
            log::warn!("Rollback failed: {rollback_err}");
        }
        return Err(e).with_context(|| format!("Seeding {} failed", path.display()));
    }
    db.commit().await.context("Failed to commit seed")?;

    println!("Seeded {}", path.display());
    Ok(())
}
