//! Durable render log backed by redb.

use std::path::Path;

use redb::{Database, ReadableTable as _, TableDefinition};

use crate::foundation::core::Seed;
use crate::foundation::error::{QqlError, QqlResult};
use crate::persist::store::{RenderRow, RenderStore, make_row};
use crate::render::backend::RenderMetadata;

/// `host|dir|filename` → JSON-encoded [`RenderRow`].
const RENDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("renders");

/// Render store in a single redb file.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database at `path`.
    pub fn open(path: &Path) -> QqlResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                QqlError::persist(format!("create db dir '{}': {e}", parent.display()))
            })?;
        }
        let db = Database::create(path).map_err(|e| {
            QqlError::persist(format!("failed to open redb at {}: {e}", path.display()))
        })?;

        // Create the table up front so readers never see it missing.
        let txn = db
            .begin_write()
            .map_err(|e| QqlError::persist(format!("begin_write failed: {e}")))?;
        txn.open_table(RENDERS_TABLE)
            .map_err(|e| QqlError::persist(format!("open_table failed: {e}")))?;
        txn.commit()
            .map_err(|e| QqlError::persist(format!("commit failed: {e}")))?;

        Ok(Self { db })
    }

    /// All rows in key order.
    pub fn rows(&self) -> QqlResult<Vec<RenderRow>> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| QqlError::persist(format!("begin_read failed: {e}")))?;
        let table = txn
            .open_table(RENDERS_TABLE)
            .map_err(|e| QqlError::persist(format!("open_table failed: {e}")))?;
        let mut out = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| QqlError::persist(format!("iter failed: {e}")))?
        {
            let (_, value) = entry.map_err(|e| QqlError::persist(format!("read failed: {e}")))?;
            let row = serde_json::from_slice(value.value())
                .map_err(|e| QqlError::persist(format!("decode row: {e}")))?;
            out.push(row);
        }
        Ok(out)
    }
}

impl RenderStore for RedbStore {
    fn insert(
        &mut self,
        host: &str,
        output_dir: &Path,
        filename: &str,
        seed: &Seed,
        render_width: u32,
        metadata: &RenderMetadata,
    ) -> QqlResult<()> {
        let row = make_row(host, output_dir, filename, seed, render_width, metadata);
        let bytes =
            serde_json::to_vec(&row).map_err(|e| QqlError::persist(format!("encode row: {e}")))?;
        let key = row.key();

        let txn = self
            .db
            .begin_write()
            .map_err(|e| QqlError::persist(format!("begin_write failed: {e}")))?;
        {
            let mut table = txn
                .open_table(RENDERS_TABLE)
                .map_err(|e| QqlError::persist(format!("open_table failed: {e}")))?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(|e| QqlError::persist(format!("insert failed: {e}")))?;
        }
        txn.commit()
            .map_err(|e| QqlError::persist(format!("commit failed: {e}")))?;
        tracing::debug!(%key, "recorded render");
        Ok(())
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/redb_store.rs"]
mod tests;
