// 🎯 Confidence Scorer - Classification quality as a derived view
// Recomputed on every read so it always reflects the latest mapping and
// description; prioritizes human review, never blocks anything.

use serde::{Deserialize, Serialize};

use crate::mapping::AccountMapping;
use crate::taxonomy::{HighLevelCategory, SubCategory, Taxonomy};

// ============================================================================
// CONFIDENCE TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

// ============================================================================
// CONFIDENCE SCORER
// ============================================================================

pub struct ConfidenceScorer {
    taxonomy: Taxonomy,
}

impl ConfidenceScorer {
    pub fn new() -> Self {
        ConfidenceScorer {
            taxonomy: Taxonomy::new(),
        }
    }

    /// Score a mapping, rules evaluated in order:
    ///
    /// 1. no detailed category → Low (nothing to be confident about)
    /// 2. lexical agreement between description and category placement → High
    /// 3. contradiction signal between description and placement → Low
    /// 4. otherwise → Medium
    pub fn score(&self, mapping: &AccountMapping) -> Confidence {
        let Some(detailed) = mapping.detailed_category else {
            return Confidence::Low;
        };

        let desc = mapping.account_description.to_lowercase();
        let high_level = self.taxonomy.high_level_of(detailed);

        // Obvious agreements
        if (desc.contains("cash") && self.taxonomy.is_member(SubCategory::CurrentAssets, detailed))
            || (desc.contains("revenue") && high_level == Some(HighLevelCategory::Revenues))
            || (desc.contains("payable") && high_level == Some(HighLevelCategory::Liabilities))
        {
            return Confidence::High;
        }

        // Likely mismatches
        let in_current_group = self.taxonomy.is_member(SubCategory::CurrentAssets, detailed)
            || self.taxonomy.is_member(SubCategory::CurrentLiabilities, detailed);
        if (desc.contains("equipment") && in_current_group)
            || (desc.contains("revenue") && high_level == Some(HighLevelCategory::Expenses))
        {
            return Confidence::Low;
        }

        Confidence::Medium
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
