//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// mg - apply versioned SQL migrations exactly once
#[derive(Parser, Debug)]
#[command(name = "mg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to mg.yml (default: ./mg.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory containing one subdirectory per migration
    #[arg(short, long, global = true, env = "MG_MIGRATIONS_DIR")]
    pub migrations_dir: Option<String>,

    /// Database connection string (postgres:// URL or DuckDB path)
    #[arg(
        short,
        long,
        global = true,
        env = "DATABASE_CONNECTION",
        hide_env_values = true
    )]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new, empty migration
    Create(CreateArgs),

    /// Apply all pending migrations in one transaction
    Migrate(MigrateArgs),

    /// Show applied and pending migrations
    Status(StatusArgs),

    /// Execute a SQL file against the database in one transaction
    Seed(SeedArgs),
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration label (prompted for when omitted; spaces are not allowed)
    pub name: Option<String>,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Skip the advisory lock normally held for the run
    #[arg(long)]
    pub no_lock: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// The path to the SQL file to be seeded
    #[arg(short, long)]
    pub path: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
