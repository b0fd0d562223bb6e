//! ==============================================================================
//! tips.rs - energy tip seeder
//! ==============================================================================
//!
//! purpose:
//!     makes sure a local sqlite file holds the fixed list of energy saving
//!     tips exactly once. nothing in the HTTP surface reads this table.
//!
//! algorithm:
//!     open-or-create the file, create `energy_tips` if missing, count rows,
//!     and insert the ten tips in order only when the table is empty. the
//!     insert runs in a single transaction, so a failure leaves no partial
//!     list behind.
//!
//! relationships:
//!     - used by: bin/seed_tips.rs (one-shot run)
//!     - uses: rusqlite (synchronous, no runtime needed)
//!
//! ==============================================================================

use std::path::Path;

use rusqlite::{params, Connection};

/// the tips, in id order
pub const ENERGY_TIPS: [&str; 10] = [
    "Turn off lights when not in use.",
    "Unplug devices that are not being used.",
    "Use energy-efficient light bulbs.",
    "Install a programmable thermostat.",
    "Seal windows and doors to prevent heat loss.",
    "Use appliances during off-peak hours.",
    "Consider using solar panels.",
    "Maintain your HVAC system regularly.",
    "Use power strips to turn off multiple devices.",
    "Wash clothes in cold water.",
];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to open tip store {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Tip store query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// a stored tip row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub id: i64,
    pub tip: String,
}

/// open (or create) the sqlite file at `path`
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection, SeedError> {
    let path = path.as_ref();
    Connection::open(path).map_err(|source| SeedError::Open {
        path: path.display().to_string(),
        source,
    })
}

/// seed the file at `path`, returning how many tips were inserted
pub fn seed_path<P: AsRef<Path>>(path: P) -> Result<usize, SeedError> {
    let mut conn = open(path)?;
    seed(&mut conn)
}

/// ensure the tip table exists and holds the ten tips
///
/// returns 10 on a fresh table and 0 once the table has any rows.
pub fn seed(conn: &mut Connection) -> Result<usize, SeedError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS energy_tips (
            id  INTEGER PRIMARY KEY AUTOINCREMENT,
            tip TEXT    NOT NULL
        );",
    )?;

    let tx = conn.transaction()?;
    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM energy_tips", [], |row| row.get(0))?;

    let mut inserted = 0;
    if existing == 0 {
        {
            let mut stmt = tx.prepare("INSERT INTO energy_tips (tip) VALUES (?1)")?;
            for tip in ENERGY_TIPS {
                inserted += stmt.execute(params![tip])?;
            }
        }
        tracing::debug!("[SEED] Inserted {} tips", inserted);
    } else {
        tracing::debug!("[SEED] Table already holds {} rows, skipping insert", existing);
    }
    tx.commit()?;

    Ok(inserted)
}

/// all tips ordered by id
pub fn list_tips(conn: &Connection) -> Result<Vec<Tip>, SeedError> {
    let mut stmt = conn.prepare("SELECT id, tip FROM energy_tips ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok(Tip { id: row.get(0)?, tip: row.get(1)? }))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fixed_list(conn: &Connection) {
        let tips = list_tips(conn).unwrap();
        assert_eq!(tips.len(), 10);
        for (i, (row, expected)) in tips.iter().zip(ENERGY_TIPS).enumerate() {
            assert_eq!(row.id, i as i64 + 1);
            assert_eq!(row.tip, expected);
        }
    }

    #[test]
    fn fresh_store_gets_ten_tips_in_order() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(seed(&mut conn).unwrap(), 10);
        assert_fixed_list(&conn);
    }

    #[test]
    fn reseeding_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(seed(&mut conn).unwrap(), 10);
        for _ in 0..4 {
            assert_eq!(seed(&mut conn).unwrap(), 0);
        }
        assert_fixed_list(&conn);
    }

    #[test]
    fn non_empty_table_is_left_alone() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE energy_tips (id INTEGER PRIMARY KEY AUTOINCREMENT, tip TEXT NOT NULL);
             INSERT INTO energy_tips (tip) VALUES ('Close the fridge door.');",
        )
        .unwrap();

        assert_eq!(seed(&mut conn).unwrap(), 0);
        let tips = list_tips(&conn).unwrap();
        assert_eq!(tips, vec![Tip { id: 1, tip: "Close the fridge door.".to_string() }]);
    }

    #[test]
    fn seeding_a_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("energy.db");

        assert_eq!(seed_path(&path).unwrap(), 10);
        assert_eq!(seed_path(&path).unwrap(), 0);
        assert_eq!(seed_path(&path).unwrap(), 0);

        let conn = open(&path).unwrap();
        assert_fixed_list(&conn);
    }

    #[test]
    fn unopenable_path_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("energy.db");

        let err = seed_path(&path).unwrap_err();
        assert!(matches!(err, SeedError::Open { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("no-such-dir"));
    }
}
