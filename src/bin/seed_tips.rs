//! seed-tips: create the energy tips table and fill it once.
//!
//! the database path comes from `[tips] database_path` in monitor.toml, or
//! the first command line argument when given. running it again is a no-op.

use std::path::PathBuf;

use anyhow::Result;
use energy_monitor::config::MonitorConfig;
use energy_monitor::tips;

fn main() -> Result<()> {
    let config = MonitorConfig::from_env_or_default()?;
    energy_monitor::init_tracing(&config.logging.level);

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.tips.database_path);

    // fatal: reported once, by anyhow, as main returns
    let inserted = tips::seed_path(&path)?;

    if inserted > 0 {
        tracing::info!("[SEED] Inserted {} tips into {}", inserted, path.display());
    } else {
        tracing::info!("[SEED] {} already seeded, nothing to do", path.display());
    }

    let conn = tips::open(&path)?;
    for tip in tips::list_tips(&conn)? {
        tracing::debug!("[SEED] {:>2}: {}", tip.id, tip.tip);
    }

    println!("Database and table created, and initial tips inserted if the table was empty.");
    Ok(())
}
