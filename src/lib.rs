// Statement Mapping Engine - Core Library
// Classifies trial balance accounts into a fixed three-level financial
// reporting taxonomy and validates double-entry integrity. The engine is
// stateless: every operation is a pure function over the snapshots the
// caller passes in.

pub mod taxonomy;   // Fixed statement → group → detailed category tree
pub mod classifier; // Ordered keyword rules proposing detailed categories
pub mod confidence; // High/medium/low review-prioritization scoring
pub mod ledger;     // Trial balance records + CSV loading
pub mod mapping;    // Account → category assignments with cascade invariants
pub mod validator;  // Debits-equal-credits reconciliation check
pub mod statements; // Mapped balances → statement lines and metrics

// Re-export commonly used types
pub use taxonomy::{DetailedCategory, HighLevelCategory, Statement, SubCategory, Taxonomy};
pub use classifier::{Classifier, ClassifierRule, FALLBACK_CATEGORY};
pub use confidence::{Confidence, ConfidenceScorer};
pub use ledger::{load_csv, read_trial_balance, LedgerRecord};
pub use mapping::{apply_edit, AccountMapping, MappingEdit, MappingSet, MappingStats};
pub use validator::{TrialBalanceValidator, ValidationReport, ValidationSummary};
pub use statements::{DashboardMetrics, FinancialStatement, StatementBuilder, StatementLine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
