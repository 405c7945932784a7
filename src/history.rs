//! Calculation history.
//!
//! [`HistoryStore`] keeps the most recent calculation results, newest first,
//! optionally backed by a JSON file that is rewritten after every change.
//! Writes go to a temp file in the same directory that is renamed over the
//! history file, and memory is only updated once the write succeeded.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::display::{format_currency, format_timestamp};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, PayPeriod, RiskClass};

/// Maximum number of results kept.
pub const HISTORY_CAPACITY: usize = 100;

/// A compact view of a stored result for list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Id of the stored result.
    pub id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Pay period of the calculation.
    pub period: PayPeriod,
    /// Jurisdiction code used for payroll tax.
    pub jurisdiction: String,
    /// IMSS risk class.
    pub risk_class: RiskClass,
    /// Gross salary per pay run.
    pub gross_salary: Decimal,
    /// Net salary per pay run.
    pub net_salary: Decimal,
    /// Total company cost per pay run.
    pub total_company_cost: Decimal,
    /// Human-readable strings for the fields above.
    pub display: SummaryDisplay,
}

/// Spanish display strings for a [`HistorySummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDisplay {
    /// e.g. `16 oct 2026, 14:05`.
    pub timestamp: String,
    /// e.g. `Mensual`.
    pub period: String,
    /// e.g. `Clase III`.
    pub risk_class: String,
    /// e.g. `$15,000.00`.
    pub gross_salary: String,
    /// Formatted net salary.
    pub net_salary: String,
    /// Formatted total company cost.
    pub total_company_cost: String,
}

impl From<&CalculationResult> for HistorySummary {
    fn from(result: &CalculationResult) -> Self {
        Self {
            id: result.id,
            timestamp: result.timestamp,
            period: result.period,
            jurisdiction: result.input.jurisdiction.clone(),
            risk_class: result.input.risk_class,
            gross_salary: result.gross_salary,
            net_salary: result.net_salary,
            total_company_cost: result.total_company_cost,
            display: SummaryDisplay {
                timestamp: format_timestamp(&result.timestamp),
                period: result.period.display_name().to_string(),
                risk_class: result.input.risk_class.label(),
                gross_salary: format_currency(result.gross_salary),
                net_salary: format_currency(result.net_salary),
                total_company_cost: format_currency(result.total_company_cost),
            },
        }
    }
}

/// Newest-first store of calculation results, capped at
/// [`HISTORY_CAPACITY`].
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<CalculationResult>,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Creates an empty store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a store backed by a JSON file.
    ///
    /// A missing file starts an empty history. A file that cannot be
    /// parsed is logged and treated as empty; it is overwritten on the next
    /// change.
    ///
    /// # Errors
    ///
    /// Returns `HistoryStorage` if the file exists but cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<CalculationResult>>(&content) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "History file is corrupt, starting with empty history"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(storage_error(&path, e)),
        };

        info!(path = %path.display(), entries = entries.len(), "Opened calculation history");

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Adds a result at the front, dropping the oldest beyond capacity.
    ///
    /// If the file write fails the store is left unchanged.
    pub fn record(&mut self, result: CalculationResult) -> EngineResult<()> {
        let mut next = Vec::with_capacity(HISTORY_CAPACITY);
        next.push(result);
        next.extend(self.entries.iter().take(HISTORY_CAPACITY - 1).cloned());
        self.commit(next)
    }

    /// Returns all stored results, newest first.
    pub fn list(&self) -> &[CalculationResult] {
        &self.entries
    }

    /// Returns summaries of all stored results, newest first.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries.iter().map(HistorySummary::from).collect()
    }

    /// Looks up a stored result by id.
    pub fn get(&self, id: Uuid) -> Option<&CalculationResult> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Removes a result. Returns whether anything was removed.
    pub fn delete(&mut self, id: Uuid) -> EngineResult<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Removes every stored result.
    pub fn clear(&mut self) -> EngineResult<()> {
        self.commit(Vec::new())
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when changes are written to a file.
    pub fn is_file_backed(&self) -> bool {
        self.path.is_some()
    }

    /// Describes where the history lives, for error messages.
    pub fn location(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    }

    /// Writes `next` to the backing file, then makes it the current list.
    fn commit(&mut self, next: Vec<CalculationResult>) -> EngineResult<()> {
        if let Some(path) = &self.path {
            write_atomically(path, &next)?;
            debug!(path = %path.display(), entries = next.len(), "Wrote calculation history");
        }
        self.entries = next;
        Ok(())
    }
}

fn write_atomically(path: &Path, entries: &[CalculationResult]) -> EngineResult<()> {
    let json = serde_json::to_vec_pretty(entries).map_err(|e| EngineError::HistoryStorage {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| storage_error(path, e))?;
    tmp.write_all(&json).map_err(|e| storage_error(path, e))?;
    tmp.as_file().sync_all().map_err(|e| storage_error(path, e))?;
    tmp.persist(path).map_err(|e| storage_error(path, e.error))?;
    Ok(())
}

fn storage_error(path: &Path, error: std::io::Error) -> EngineError {
    EngineError::HistoryStorage {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
