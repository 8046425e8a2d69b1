//! CSV-backed expense ledger.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::debug;

use budgetbee_core::LedgerEntry;

const HEADERS: [&str; 4] = ["Date", "Description", "Amount", "Category"];

/// Expense ledger stored as a flat CSV file.
pub struct Ledger {
    path: PathBuf,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Load the ledger. A missing file is an empty ledger.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut entries = Vec::new();

        if path.exists() {
            let mut reader = csv::Reader::from_path(path)
                .with_context(|| format!("failed to open ledger {}", path.display()))?;
            for (i, record) in reader.deserialize().enumerate() {
                let entry: LedgerEntry = record
                    .with_context(|| format!("invalid ledger row {} in {}", i + 1, path.display()))?;
                entries.push(entry);
            }
        }

        debug!("Loaded {} ledger entries from {}", entries.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn append(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<LedgerEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write all entries back to disk. The header row is always written.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .with_context(|| format!("failed to write ledger {}", self.path.display()))?;

        wtr.write_record(HEADERS)?;
        for entry in &self.entries {
            wtr.serialize(entry)?;
        }
        wtr.flush()?;

        debug!("Saved {} ledger entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}
