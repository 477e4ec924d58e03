pub mod schema;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct Database {
    conn: Connection,
}

/// Thread-safe wrapper around Database.
#[derive(Clone)]
pub struct SharedDatabase {
    inner: Arc<Mutex<Database>>,
}

impl SharedDatabase {
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let db = Database::open(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(db)),
        })
    }

    /// Replace the cached scam list for a chain and stamp the fetch time.
    pub fn replace_scam_list(
        &self,
        chain: &str,
        addresses: &HashSet<String>,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), rusqlite::Error> {
        let mut db = self.inner.lock().unwrap();
        db.replace_scam_list(chain, addresses, fetched_at)
    }

    /// Load the cached scam list for a chain. Empty set when never cached.
    pub fn load_scam_list(&self, chain: &str) -> Result<HashSet<String>, rusqlite::Error> {
        let db = self.inner.lock().unwrap();
        db.load_scam_list(chain)
    }

    /// When the chain's list was last fetched, if ever.
    pub fn scam_list_fetched_at(
        &self,
        chain: &str,
    ) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
        let db = self.inner.lock().unwrap();
        db.scam_list_fetched_at(chain)
    }
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    fn replace_scam_list(
        &mut self,
        chain: &str,
        addresses: &HashSet<String>,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), rusqlite::Error> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM scam_addresses WHERE chain = ?1", params![chain])?;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO scam_addresses (chain, address) VALUES (?1, ?2)")?;
            for address in addresses {
                stmt.execute(params![chain, address])?;
            }
        }
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![format!("fetched_at:{chain}"), fetched_at.to_rfc3339()],
        )?;
        tx.commit()
    }

    fn load_scam_list(&self, chain: &str) -> Result<HashSet<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT address FROM scam_addresses WHERE chain = ?1")?;
        let rows = stmt.query_map(params![chain], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    fn scam_list_fetched_at(&self, chain: &str) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM meta WHERE key = ?1")?;
        let mut rows = stmt.query(params![format!("fetched_at:{chain}")])?;
        match rows.next()? {
            Some(row) => {
                let raw: String = row.get(0)?;
                Ok(DateTime::parse_from_rfc3339(&raw)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }
}
