// ⚖️ Reconciliation Validator - double-entry integrity
// A trial balance must sum to zero: total debits equal total credits, so the
// signed balances cancel out. An unbalanced ledger is a normal, reportable
// outcome, never an error path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ledger::LedgerRecord;

// ============================================================================
// VALIDATION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_debits: f64,
    pub total_credits: f64,
    pub total_balance: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ValidationSummary,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    pub fn summary_line(&self) -> String {
        format!(
            "{} records, debits {:.2}, credits {:.2}, net {:.2} - {}",
            self.summary.record_count,
            self.summary.total_debits,
            self.summary.total_credits,
            self.summary.total_balance,
            if self.is_valid { "balanced" } else { "NOT balanced" }
        )
    }
}

// ============================================================================
// TRIAL BALANCE VALIDATOR
// ============================================================================

pub struct TrialBalanceValidator {
    /// Tolerance for floating-point/rounding drift, in reporting currency
    /// units (default: 0.01). Not a business-rule threshold.
    pub tolerance: f64,
}

impl TrialBalanceValidator {
    pub fn new() -> Self {
        TrialBalanceValidator { tolerance: 0.01 }
    }

    pub fn with_tolerance(tolerance: f64) -> Self {
        TrialBalanceValidator { tolerance }
    }

    /// Validate a ledger snapshot. Pure and uncached: re-run whenever the
    /// snapshot changes.
    pub fn validate(&self, records: &[LedgerRecord]) -> ValidationReport {
        let total_debits: f64 = records.iter().map(|r| r.debit).sum();
        let total_credits: f64 = records.iter().map(|r| r.credit).sum();
        let total_balance: f64 = records.iter().map(|r| r.balance).sum();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let is_valid = total_balance.abs() < self.tolerance;
        if !is_valid {
            errors.push("Trial balance does not sum to zero".to_string());
        }

        // Structural checks surface as warnings only
        self.check_duplicate_accounts(records, &mut warnings);
        self.check_balance_identity(records, &mut warnings);

        ValidationReport {
            is_valid,
            errors,
            warnings,
            summary: ValidationSummary {
                total_debits,
                total_credits,
                total_balance,
                record_count: records.len(),
            },
            validated_at: Utc::now(),
        }
    }

    /// An account number should appear at most once per period
    fn check_duplicate_accounts(&self, records: &[LedgerRecord], warnings: &mut Vec<String>) {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut reported: HashSet<(&str, &str)> = HashSet::new();

        for record in records {
            let key = (record.period.as_str(), record.account_number.as_str());
            if !seen.insert(key) && reported.insert(key) {
                warnings.push(format!(
                    "Duplicate account {} in period {}",
                    record.account_number, record.period
                ));
            }
        }
    }

    /// balance = debit - credit is fixed at ingestion; drift means the source
    /// data disagrees with its own sign convention
    fn check_balance_identity(&self, records: &[LedgerRecord], warnings: &mut Vec<String>) {
        for record in records {
            let expected = record.debit - record.credit;
            if (record.balance - expected).abs() >= self.tolerance {
                warnings.push(format!(
                    "Account {}: balance {:.2} does not equal debit minus credit ({:.2})",
                    record.account_number, record.balance, expected
                ));
            }
        }
    }
}

impl Default for TrialBalanceValidator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
