// 📒 Ledger - Trial balance records
// Immutable once ingested; many records may share an account number across
// periods. Sign convention is fixed at ingestion: balance = debit - credit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

// ============================================================================
// LEDGER RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "Period")]
    pub period: String,

    #[serde(rename = "Account_Number")]
    pub account_number: String,

    #[serde(rename = "Account_Description")]
    pub account_description: String,

    #[serde(rename = "Debit")]
    pub debit: f64,

    #[serde(rename = "Credit")]
    pub credit: f64,

    #[serde(rename = "Balance")]
    pub balance: f64,
}

impl LedgerRecord {
    pub fn new(
        period: &str,
        account_number: &str,
        account_description: &str,
        debit: f64,
        credit: f64,
        balance: f64,
    ) -> Self {
        LedgerRecord {
            period: period.to_string(),
            account_number: account_number.to_string(),
            account_description: account_description.to_string(),
            debit,
            credit,
            balance,
        }
    }
}

// ============================================================================
// CSV LOADING
// ============================================================================

/// Load trial balance records from any CSV source
pub fn read_trial_balance<R: Read>(reader: R) -> Result<Vec<LedgerRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: LedgerRecord = result.context("Failed to deserialize ledger record")?;
        records.push(record);
    }

    Ok(records)
}

/// Load trial balance records from a CSV file
pub fn load_csv(csv_path: &Path) -> Result<Vec<LedgerRecord>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    read_trial_balance(file)
}

// ============================================================================
// TESTS
// ============================================================================
