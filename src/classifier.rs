// 🏷️ Classifier - Rules as Data
// Ordered keyword rules that propose a detailed category for an account
// description. First match wins; rule order encodes priority because
// keywords overlap ("accrued income" must fire before "income").

use serde::Serialize;

use crate::taxonomy::DetailedCategory;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ClassifierRule {
    /// Keywords matched case-insensitively as substrings; any hit matches
    pub keywords: &'static [&'static str],

    /// Keywords that veto the match even when a keyword hits
    pub exclude: &'static [&'static str],

    /// Category assigned when the rule matches
    pub target: DetailedCategory,
}

impl ClassifierRule {
    /// Check the rule against an already-lowercased description
    fn matches(&self, desc_lower: &str) -> bool {
        self.keywords.iter().any(|kw| desc_lower.contains(kw))
            && !self.exclude.iter().any(|kw| desc_lower.contains(kw))
    }
}

// ============================================================================
// DEFAULT RULE SET (order is the priority - do not reorder)
// ============================================================================

const DEFAULT_RULES: &[ClassifierRule] = &[
    // Cash and equivalents
    ClassifierRule {
        keywords: &["cash", "bank"],
        exclude: &[],
        target: DetailedCategory::CashAndCashEquivalents,
    },
    // Receivables
    ClassifierRule {
        keywords: &["receivable", "debtor"],
        exclude: &[],
        target: DetailedCategory::TradeReceivables,
    },
    ClassifierRule {
        keywords: &["accrued income"],
        exclude: &[],
        target: DetailedCategory::AccruedIncome,
    },
    // Inventory
    ClassifierRule {
        keywords: &["inventory", "stock"],
        exclude: &[],
        target: DetailedCategory::Inventories,
    },
    // Property and equipment
    ClassifierRule {
        keywords: &["property", "plant", "equipment", "machinery"],
        exclude: &[],
        target: DetailedCategory::PropertyPlantAndEquipment,
    },
    ClassifierRule {
        keywords: &["right-of-use", "lease asset"],
        exclude: &[],
        target: DetailedCategory::RightOfUseAssets,
    },
    ClassifierRule {
        keywords: &["intangible", "software", "patent"],
        exclude: &[],
        target: DetailedCategory::IntangibleAssets,
    },
    ClassifierRule {
        keywords: &["goodwill"],
        exclude: &[],
        target: DetailedCategory::Goodwill,
    },
    // Payables
    ClassifierRule {
        keywords: &["payable", "creditor"],
        exclude: &[],
        target: DetailedCategory::TradePayables,
    },
    ClassifierRule {
        keywords: &["accrued expense", "accrual"],
        exclude: &[],
        target: DetailedCategory::AccruedExpenses,
    },
    // Borrowings and liabilities
    ClassifierRule {
        keywords: &["debt", "loan", "borrowing"],
        exclude: &[],
        target: DetailedCategory::BorrowingsNonCurrent,
    },
    ClassifierRule {
        keywords: &["lease liability"],
        exclude: &[],
        target: DetailedCategory::LeaseLiabilitiesNonCurrent,
    },
    // Equity
    ClassifierRule {
        keywords: &["share capital", "capital stock"],
        exclude: &[],
        target: DetailedCategory::ShareCapital,
    },
    ClassifierRule {
        keywords: &["retained earnings", "accumulated"],
        exclude: &[],
        target: DetailedCategory::RetainedEarnings,
    },
    ClassifierRule {
        keywords: &["reserve"],
        exclude: &[],
        target: DetailedCategory::OtherReserves,
    },
    // Revenue and income ("income" only counts when "expense" is absent,
    // so "Income Tax Expense" falls through to the expense rules)
    ClassifierRule {
        keywords: &["revenue", "sales"],
        exclude: &[],
        target: DetailedCategory::Revenues,
    },
    ClassifierRule {
        keywords: &["income"],
        exclude: &["expense"],
        target: DetailedCategory::Revenues,
    },
    // Expenses
    ClassifierRule {
        keywords: &["cost of sales", "cogs"],
        exclude: &[],
        target: DetailedCategory::CostOfSales,
    },
    ClassifierRule {
        keywords: &["depreciation", "amortization"],
        exclude: &[],
        target: DetailedCategory::DepreciationAndAmortization,
    },
    ClassifierRule {
        keywords: &["interest expense"],
        exclude: &[],
        target: DetailedCategory::InterestExpense,
    },
    ClassifierRule {
        keywords: &["tax expense", "income tax"],
        exclude: &[],
        target: DetailedCategory::IncomeTaxExpense,
    },
    ClassifierRule {
        keywords: &["expense", "cost"],
        exclude: &[],
        target: DetailedCategory::GeneralAndAdministrativeExpenses,
    },
];

/// Fallback for descriptions no rule matches: unclassified but non-empty,
/// so downstream hierarchy invariants stay satisfiable
pub const FALLBACK_CATEGORY: DetailedCategory = DetailedCategory::CashAndCashEquivalents;

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct Classifier {
    rules: Vec<ClassifierRule>,
}

impl Classifier {
    /// Classifier with the built-in ordered rule set
    pub fn with_defaults() -> Self {
        Classifier {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Classifier over a custom ordered rule set
    pub fn from_rules(rules: Vec<ClassifierRule>) -> Self {
        Classifier { rules }
    }

    /// Propose a detailed category for an account description.
    ///
    /// Pure function: first matching rule wins, unmatched descriptions get
    /// [`FALLBACK_CATEGORY`].
    pub fn classify(&self, description: &str) -> DetailedCategory {
        let desc_lower = description.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&desc_lower))
            .map(|rule| rule.target)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn test_classify_cash_accounts() {
        let classifier = Classifier::with_defaults();

        assert_eq!(
            classifier.classify("Cash and Cash Equivalents"),
            DetailedCategory::CashAndCashEquivalents
        );
        assert_eq!(
            classifier.classify("BANK DEPOSITS - OPERATING"),
            DetailedCategory::CashAndCashEquivalents
        );
    }

    #[test]
    fn test_classify_payables() {
        let classifier = Classifier::with_defaults();

        assert_eq!(
            classifier.classify("Trade Payables"),
            DetailedCategory::TradePayables
        );
        assert_eq!(
            classifier.classify("Sundry creditors"),
            DetailedCategory::TradePayables
        );
    }

    #[test]
    fn test_rule_order_accrued_income_before_income() {
        let classifier = Classifier::with_defaults();

        // "Accrued Income" contains "income" but the specific rule comes first
        assert_eq!(
            classifier.classify("Accrued Income"),
            DetailedCategory::AccruedIncome
        );
        assert_eq!(
            classifier.classify("Accrued expenses and other accruals"),
            DetailedCategory::AccruedExpenses
        );
    }

    #[test]
    fn test_income_rule_excludes_expense() {
        let classifier = Classifier::with_defaults();

        assert_eq!(
            classifier.classify("Rental income"),
            DetailedCategory::Revenues
        );
        // "income" + "expense" falls through to the tax rule
        assert_eq!(
            classifier.classify("Income Tax Expense"),
            DetailedCategory::IncomeTaxExpense
        );
    }

    #[test]
    fn test_specific_expense_rules_before_generic() {
        let classifier = Classifier::with_defaults();

        assert_eq!(
            classifier.classify("Interest expense on bonds"),
            DetailedCategory::InterestExpense
        );
        assert_eq!(
            classifier.classify("Depreciation charge for the year"),
            DetailedCategory::DepreciationAndAmortization
        );
        assert_eq!(
            classifier.classify("Office expenses"),
            DetailedCategory::GeneralAndAdministrativeExpenses
        );
    }

    #[test]
    fn test_equipment_maps_to_ppe() {
        let classifier = Classifier::with_defaults();

        assert_eq!(
            classifier.classify("Office Equipment"),
            DetailedCategory::PropertyPlantAndEquipment
        );
        assert_eq!(
            classifier.classify("Plant & machinery"),
            DetailedCategory::PropertyPlantAndEquipment
        );
    }

    #[test]
    fn test_unmatched_description_falls_back() {
        let classifier = Classifier::with_defaults();

        assert_eq!(classifier.classify("Miscellaneous 42"), FALLBACK_CATEGORY);
        assert_eq!(classifier.classify(""), FALLBACK_CATEGORY);
    }

    #[test]
    fn test_every_rule_target_is_inside_the_taxonomy() {
        let taxonomy = Taxonomy::new();

        for rule in DEFAULT_RULES {
            assert!(
                taxonomy.high_level_of(rule.target).is_some(),
                "rule target {:?} has no high-level category",
                rule.target
            );
        }
        assert!(taxonomy.high_level_of(FALLBACK_CATEGORY).is_some());
    }
}
