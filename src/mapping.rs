// 🗺️ Mapping Store - account → category assignments
// Holds one mapping per unique account number and keeps the three-level
// hierarchy consistent under manual edits, drag-and-drop reassignment and
// bulk operations. Every mutation is a pure snapshot → snapshot function:
// the caller owns the state and never observes a mapping mid-cascade.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::confidence::{Confidence, ConfidenceScorer};
use crate::ledger::LedgerRecord;
use crate::taxonomy::{DetailedCategory, HighLevelCategory, SubCategory, Taxonomy};

// ============================================================================
// ACCOUNT MAPPING
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMapping {
    /// Unique key within a mapping set
    pub account_number: String,

    pub account_description: String,

    pub high_level_category: Option<HighLevelCategory>,

    pub sub_category: Option<SubCategory>,

    pub detailed_category: Option<DetailedCategory>,
}

impl AccountMapping {
    /// Empty mapping for an account seen for the first time
    pub fn unmapped(account_number: &str, account_description: &str) -> Self {
        AccountMapping {
            account_number: account_number.to_string(),
            account_description: account_description.to_string(),
            high_level_category: None,
            sub_category: None,
            detailed_category: None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.detailed_category.is_some()
    }
}

// ============================================================================
// HIERARCHY EDITS
// ============================================================================

/// A single-field edit to one hierarchy level. `None` values clear the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MappingEdit {
    HighLevel(Option<HighLevelCategory>),
    SubCategory(Option<SubCategory>),
    Detailed(Option<DetailedCategory>),
}

/// State-transition function for one mapping: applies the edit, then cascades
/// resets so the hierarchy invariants hold.
///
/// One rule per level:
/// - editing the high-level category resets sub-category and detailed category
/// - editing the sub-category resets the detailed category
/// - setting a detailed category that is not a member of the currently
///   selected sub-category clears the sub-category (the "detailed alone"
///   state is legal and back-derivable via the taxonomy)
pub fn apply_edit(mapping: &AccountMapping, edit: MappingEdit) -> AccountMapping {
    let taxonomy = Taxonomy::new();
    let mut next = mapping.clone();

    match edit {
        MappingEdit::HighLevel(value) => {
            next.high_level_category = value;
            next.sub_category = None;
            next.detailed_category = None;
        }
        MappingEdit::SubCategory(value) => {
            next.sub_category = value;
            next.detailed_category = None;
        }
        MappingEdit::Detailed(value) => {
            next.detailed_category = value;
            if let (Some(group), Some(detailed)) = (next.sub_category, value) {
                if !taxonomy.is_member(group, detailed) {
                    debug!(
                        account = %next.account_number,
                        group = group.name(),
                        detailed = detailed.name(),
                        "detailed category outside selected group, clearing sub-category"
                    );
                    next.sub_category = None;
                }
            }
        }
    }

    next
}

// ============================================================================
// MAPPING STATS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MappingStats {
    pub total: usize,
    pub mapped: usize,
    pub need_review: usize,
    pub high_confidence: usize,
}

impl MappingStats {
    pub fn percent_mapped(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.mapped as f64 / self.total as f64) * 100.0
    }
}

// ============================================================================
// MAPPING SET
// ============================================================================

/// The full set of account → category assignments, in first-seen order.
///
/// All mutating operations return a complete, newly-derived set; there is no
/// partial application visible to callers. Operations on unknown account
/// numbers are logged no-ops, never errors - the UI layer may hold stale
/// references during concurrent edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingSet {
    mappings: Vec<AccountMapping>,
}

impl MappingSet {
    pub fn new() -> Self {
        MappingSet {
            mappings: Vec::new(),
        }
    }

    /// Derive one empty mapping per unique account number, first-seen order
    pub fn from_records(records: &[LedgerRecord]) -> Self {
        let mut mappings: Vec<AccountMapping> = Vec::new();

        for record in records {
            if !mappings
                .iter()
                .any(|m| m.account_number == record.account_number)
            {
                mappings.push(AccountMapping::unmapped(
                    &record.account_number,
                    &record.account_description,
                ));
            }
        }

        MappingSet { mappings }
    }

    pub fn from_mappings(mappings: Vec<AccountMapping>) -> Self {
        MappingSet { mappings }
    }

    pub fn get(&self, account_number: &str) -> Option<&AccountMapping> {
        self.mappings
            .iter()
            .find(|m| m.account_number == account_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountMapping> {
        self.mappings.iter()
    }

    pub fn as_slice(&self) -> &[AccountMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Apply a single-field edit to one account, cascading resets as needed.
    /// Unknown accounts are a no-op: the store never fabricates mappings for
    /// accounts the ledger has not shown it.
    pub fn apply_edit(&self, account_number: &str, edit: MappingEdit) -> MappingSet {
        if self.get(account_number).is_none() {
            warn!(account = account_number, "edit on unknown account ignored");
            return self.clone();
        }

        let mappings = self
            .mappings
            .iter()
            .map(|m| {
                if m.account_number == account_number {
                    apply_edit(m, edit)
                } else {
                    m.clone()
                }
            })
            .collect();

        MappingSet { mappings }
    }

    /// Drag-and-drop path: set the detailed category directly, then back-fill
    /// the high-level category via reverse lookup when it is empty. No-op when
    /// the account already sits in the target category.
    pub fn reassign_detailed(
        &self,
        account_number: &str,
        new_detailed: DetailedCategory,
    ) -> MappingSet {
        let taxonomy = Taxonomy::new();

        let Some(current) = self.get(account_number) else {
            warn!(account = account_number, "reassign on unknown account ignored");
            return self.clone();
        };
        if current.detailed_category == Some(new_detailed) {
            return self.clone();
        }

        let mappings = self
            .mappings
            .iter()
            .map(|m| {
                if m.account_number != account_number {
                    return m.clone();
                }
                let mut next = apply_edit(m, MappingEdit::Detailed(Some(new_detailed)));
                if next.high_level_category.is_none() {
                    next.high_level_category = taxonomy.high_level_of(new_detailed);
                }
                next
            })
            .collect();

        MappingSet { mappings }
    }

    /// Classify every account that has no detailed category yet. Accounts that
    /// are already classified are never overwritten, which makes the operation
    /// idempotent.
    pub fn bulk_auto_map(&self, classifier: &Classifier) -> MappingSet {
        let taxonomy = Taxonomy::new();
        let mut newly_mapped = 0;

        let mappings = self
            .mappings
            .iter()
            .map(|m| {
                if m.detailed_category.is_some() {
                    return m.clone();
                }
                newly_mapped += 1;
                let detailed = classifier.classify(&m.account_description);
                let mut next = m.clone();
                next.detailed_category = Some(detailed);
                if next.high_level_category.is_none() {
                    next.high_level_category = taxonomy.high_level_of(detailed);
                }
                next
            })
            .collect();

        info!(newly_mapped, total = self.mappings.len(), "auto-map complete");
        MappingSet { mappings }
    }

    /// Back-fill the high-level category for every mapping the scorer rates
    /// High that is still missing one.
    pub fn bulk_approve_high_confidence(&self, scorer: &ConfidenceScorer) -> MappingSet {
        let taxonomy = Taxonomy::new();
        let mut approved = 0;

        let mappings = self
            .mappings
            .iter()
            .map(|m| {
                let needs_backfill =
                    m.high_level_category.is_none() && scorer.score(m) == Confidence::High;
                if !needs_backfill {
                    return m.clone();
                }
                approved += 1;
                let mut next = m.clone();
                next.high_level_category =
                    m.detailed_category.and_then(|d| taxonomy.high_level_of(d));
                next
            })
            .collect();

        info!(approved, "high-confidence mappings approved");
        MappingSet { mappings }
    }

    /// Clear every hierarchy level on every mapping
    pub fn bulk_reset(&self) -> MappingSet {
        let mappings = self
            .mappings
            .iter()
            .map(|m| AccountMapping::unmapped(&m.account_number, &m.account_description))
            .collect();

        info!(total = self.mappings.len(), "all mappings reset");
        MappingSet { mappings }
    }

    /// Review-prioritization counters, recomputed from the current snapshot
    pub fn stats(&self, scorer: &ConfidenceScorer) -> MappingStats {
        MappingStats {
            total: self.mappings.len(),
            mapped: self.mappings.iter().filter(|m| m.is_mapped()).count(),
            need_review: self
                .mappings
                .iter()
                .filter(|m| scorer.score(m) == Confidence::Low)
                .count(),
            high_confidence: self
                .mappings
                .iter()
                .filter(|m| scorer.score(m) == Confidence::High)
                .count(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<LedgerRecord> {
        vec![
            LedgerRecord::new("2024-12-31", "1001", "Cash and Cash Equivalents", 500000.0, 0.0, 500000.0),
            LedgerRecord::new("2024-12-31", "1200", "Trade Receivables", 300000.0, 0.0, 300000.0),
            LedgerRecord::new("2024-12-31", "3001", "Trade Payables", 0.0, 150000.0, -150000.0),
            LedgerRecord::new("2024-12-31", "6001", "Revenue", 0.0, 1000000.0, -1000000.0),
            // Same account, second period: must not produce a second mapping
            LedgerRecord::new("2025-03-31", "1001", "Cash and Cash Equivalents", 520000.0, 0.0, 520000.0),
        ]
    }

    fn mapped_set() -> MappingSet {
        MappingSet::from_records(&sample_records()).bulk_auto_map(&Classifier::with_defaults())
    }

    #[test]
    fn test_from_records_derives_unique_accounts() {
        let set = MappingSet::from_records(&sample_records());

        assert_eq!(set.len(), 4);
        assert_eq!(set.as_slice()[0].account_number, "1001");
        assert!(set.iter().all(|m| !m.is_mapped()));
    }

    #[test]
    fn test_clearing_high_level_cascades() {
        let set = mapped_set().apply_edit(
            "1001",
            MappingEdit::SubCategory(Some(SubCategory::CurrentAssets)),
        );
        let set = set.apply_edit("1001", MappingEdit::HighLevel(None));

        let m = set.get("1001").unwrap();
        assert_eq!(m.high_level_category, None);
        assert_eq!(m.sub_category, None);
        assert_eq!(m.detailed_category, None);
    }

    #[test]
    fn test_clearing_sub_category_cascades_to_detailed() {
        let set = mapped_set().apply_edit("1200", MappingEdit::SubCategory(None));

        let m = set.get("1200").unwrap();
        assert_eq!(m.sub_category, None);
        assert_eq!(m.detailed_category, None);
        // High level untouched
        assert_eq!(m.high_level_category, Some(HighLevelCategory::Assets));
    }

    #[test]
    fn test_changing_high_level_resets_descendants() {
        let set = mapped_set().apply_edit(
            "3001",
            MappingEdit::HighLevel(Some(HighLevelCategory::Equity)),
        );

        let m = set.get("3001").unwrap();
        assert_eq!(m.high_level_category, Some(HighLevelCategory::Equity));
        assert_eq!(m.sub_category, None);
        assert_eq!(m.detailed_category, None);
    }

    #[test]
    fn test_detailed_outside_group_clears_sub_category() {
        let set = MappingSet::from_records(&sample_records())
            .apply_edit("1001", MappingEdit::SubCategory(Some(SubCategory::CurrentAssets)))
            .apply_edit(
                "1001",
                MappingEdit::Detailed(Some(DetailedCategory::TradePayables)),
            );

        let m = set.get("1001").unwrap();
        assert_eq!(m.detailed_category, Some(DetailedCategory::TradePayables));
        assert_eq!(m.sub_category, None);
    }

    #[test]
    fn test_edit_on_unknown_account_is_a_noop() {
        let set = mapped_set();
        let edited = set.apply_edit("9999", MappingEdit::HighLevel(None));

        assert_eq!(edited.len(), set.len());
        for (before, after) in set.iter().zip(edited.iter()) {
            assert_eq!(before.detailed_category, after.detailed_category);
        }
    }

    #[test]
    fn test_reassign_detailed_backfills_high_level() {
        let set = MappingSet::from_records(&sample_records())
            .reassign_detailed("1200", DetailedCategory::OtherReceivables);

        let m = set.get("1200").unwrap();
        assert_eq!(m.detailed_category, Some(DetailedCategory::OtherReceivables));
        assert_eq!(m.high_level_category, Some(HighLevelCategory::Assets));
    }

    #[test]
    fn test_reassign_to_same_category_is_a_noop() {
        let set = mapped_set();
        let before = set.get("1001").unwrap().clone();

        let after = set.reassign_detailed("1001", before.detailed_category.unwrap());
        assert_eq!(
            after.get("1001").unwrap().detailed_category,
            before.detailed_category
        );
    }

    #[test]
    fn test_bulk_auto_map_classifies_everything() {
        let set = mapped_set();

        assert_eq!(
            set.get("1001").unwrap().detailed_category,
            Some(DetailedCategory::CashAndCashEquivalents)
        );
        assert_eq!(
            set.get("1200").unwrap().detailed_category,
            Some(DetailedCategory::TradeReceivables)
        );
        assert_eq!(
            set.get("3001").unwrap().detailed_category,
            Some(DetailedCategory::TradePayables)
        );
        assert_eq!(
            set.get("6001").unwrap().detailed_category,
            Some(DetailedCategory::Revenues)
        );
        // Reverse-lookup back-fill
        assert_eq!(
            set.get("3001").unwrap().high_level_category,
            Some(HighLevelCategory::Liabilities)
        );
    }

    #[test]
    fn test_bulk_auto_map_is_idempotent() {
        let classifier = Classifier::with_defaults();
        let base = MappingSet::from_records(&sample_records());

        // Pin one account manually; auto-map must not overwrite it
        let base = base.reassign_detailed("6001", DetailedCategory::InterestIncome);

        let once = base.bulk_auto_map(&classifier);
        let twice = once.bulk_auto_map(&classifier);

        assert_eq!(
            once.get("6001").unwrap().detailed_category,
            Some(DetailedCategory::InterestIncome)
        );
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.detailed_category, b.detailed_category);
            assert_eq!(a.high_level_category, b.high_level_category);
        }
    }

    #[test]
    fn test_reset_then_auto_map_matches_fresh_classification() {
        let classifier = Classifier::with_defaults();

        let fresh = MappingSet::from_records(&sample_records()).bulk_auto_map(&classifier);
        let round_trip = fresh.bulk_reset().bulk_auto_map(&classifier);

        for (a, b) in fresh.iter().zip(round_trip.iter()) {
            assert_eq!(a.account_number, b.account_number);
            assert_eq!(a.detailed_category, b.detailed_category);
        }
    }

    #[test]
    fn test_bulk_reset_clears_all_levels() {
        let set = mapped_set().bulk_reset();

        for m in set.iter() {
            assert_eq!(m.high_level_category, None);
            assert_eq!(m.sub_category, None);
            assert_eq!(m.detailed_category, None);
        }
    }

    #[test]
    fn test_bulk_approve_high_confidence_backfills() {
        // Build a set where detailed is assigned but high level is not
        let set = MappingSet::from_records(&sample_records())
            .apply_edit(
                "1001",
                MappingEdit::Detailed(Some(DetailedCategory::CashAndCashEquivalents)),
            )
            .apply_edit(
                "1200",
                MappingEdit::Detailed(Some(DetailedCategory::TradeReceivables)),
            );

        let scorer = ConfidenceScorer::new();
        let approved = set.bulk_approve_high_confidence(&scorer);

        // "Cash..." + current-assets placement scores High → back-filled
        assert_eq!(
            approved.get("1001").unwrap().high_level_category,
            Some(HighLevelCategory::Assets)
        );
        // "Trade Receivables" placement scores Medium → untouched
        assert_eq!(approved.get("1200").unwrap().high_level_category, None);
    }

    #[test]
    fn test_stats_reflect_confidence() {
        let scorer = ConfidenceScorer::new();
        let set = mapped_set();
        let stats = set.stats(&scorer);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.mapped, 4);
        // Cash, payables and revenue descriptions all agree with their
        // placements
        assert_eq!(stats.high_confidence, 3);
        assert_eq!(stats.need_review, 0);
        assert!((set.bulk_reset().stats(&scorer).percent_mapped() - 0.0).abs() < f64::EPSILON);
    }
}
