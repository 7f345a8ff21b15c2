// 📊 Statement Builder - mapped balances → financial statement lines
// Aggregates a ledger snapshot through the mapping set into statement lines
// and headline metrics. Previous-period figures are a data requirement
// supplied by the caller, never synthesized here.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::ledger::LedgerRecord;
use crate::mapping::MappingSet;
use crate::taxonomy::{DetailedCategory, HighLevelCategory, Statement, SubCategory, Taxonomy};

// ============================================================================
// STATEMENT LINES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLine {
    pub category: String,
    pub sub_category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    #[serde(rename = "type")]
    pub kind: Statement,
    pub period: String,
    pub lines: Vec<StatementLine>,
}

// ============================================================================
// DASHBOARD METRICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub total_equity: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_income: f64,
    pub working_capital: f64,
    pub current_ratio: f64,
    pub debt_to_equity: f64,
}

// ============================================================================
// STATEMENT BUILDER
// ============================================================================

pub struct StatementBuilder {
    taxonomy: Taxonomy,
}

impl StatementBuilder {
    pub fn new() -> Self {
        StatementBuilder {
            taxonomy: Taxonomy::new(),
        }
    }

    /// Sum record balances per detailed category, through the mapping set.
    /// Records whose account is unmapped (or unknown) contribute nothing;
    /// with a period filter, records from other periods are skipped too.
    fn balances_by_category(
        &self,
        records: &[LedgerRecord],
        mappings: &MappingSet,
        period: Option<&str>,
    ) -> HashMap<DetailedCategory, f64> {
        let mut totals: HashMap<DetailedCategory, f64> = HashMap::new();

        for record in records {
            if let Some(p) = period {
                if record.period != p {
                    continue;
                }
            }
            let Some(detailed) = mappings
                .get(&record.account_number)
                .and_then(|m| m.detailed_category)
            else {
                continue;
            };
            *totals.entry(detailed).or_insert(0.0) += record.balance;
        }

        totals
    }

    /// Presentation sign: assets and expenses carry debit balances, the rest
    /// carry credit balances and are shown positive.
    fn presented(&self, detailed: DetailedCategory, balance: f64) -> f64 {
        match self.taxonomy.high_level_of(detailed) {
            Some(HighLevelCategory::Assets) | Some(HighLevelCategory::Expenses) | None => balance,
            Some(HighLevelCategory::Liabilities)
            | Some(HighLevelCategory::Equity)
            | Some(HighLevelCategory::Revenues) => -balance,
        }
    }

    /// Build one statement for one period. Records outside `period` are
    /// ignored; the previous snapshot is taken whole, it carries its own
    /// period label. Lines appear in taxonomy order and only for categories
    /// with a mapped balance. Variance columns are filled only when a
    /// previous-period snapshot is supplied.
    ///
    /// A category belonging to more than one group produces a single line:
    /// under the group the mapping pins when one is set, otherwise under the
    /// first owning group.
    pub fn build(
        &self,
        kind: Statement,
        period: &str,
        records: &[LedgerRecord],
        mappings: &MappingSet,
        previous: Option<&[LedgerRecord]>,
    ) -> FinancialStatement {
        let totals = self.balances_by_category(records, mappings, Some(period));
        let previous_totals = previous.map(|p| self.balances_by_category(p, mappings, None));

        // Pinned sub-categories decide placement for dual-membership lines
        let mut pinned: HashMap<DetailedCategory, SubCategory> = HashMap::new();
        for m in mappings.iter() {
            if let (Some(group), Some(detailed)) = (m.sub_category, m.detailed_category) {
                pinned.insert(detailed, group);
            }
        }

        let mut emitted: HashSet<DetailedCategory> = HashSet::new();
        let mut lines = Vec::new();
        for group in self.taxonomy.groups_of(kind) {
            for &detailed in self.taxonomy.categories_of(group) {
                if emitted.contains(&detailed) {
                    continue;
                }
                if let Some(&wanted) = pinned.get(&detailed) {
                    // Defer to the pinned group when it also sits in this
                    // statement and actually contains the category
                    if wanted != group
                        && wanted.statement() == kind
                        && self.taxonomy.is_member(wanted, detailed)
                    {
                        continue;
                    }
                }
                let Some(&balance) = totals.get(&detailed) else {
                    continue;
                };
                emitted.insert(detailed);
                let amount = self.presented(detailed, balance);

                let previous_amount = previous_totals
                    .as_ref()
                    .and_then(|p| p.get(&detailed))
                    .map(|&b| self.presented(detailed, b));
                let variance = previous_amount.map(|prev| amount - prev);
                let variance_percent = previous_amount.and_then(|prev| {
                    if prev == 0.0 {
                        None
                    } else {
                        Some((amount - prev) / prev.abs() * 100.0)
                    }
                });

                lines.push(StatementLine {
                    category: detailed.name().to_string(),
                    sub_category: group.name().to_string(),
                    amount,
                    previous_amount,
                    variance,
                    variance_percent,
                });
            }
        }

        FinancialStatement {
            kind,
            period: period.to_string(),
            lines,
        }
    }

    fn sum_high_level(
        &self,
        totals: &HashMap<DetailedCategory, f64>,
        high_level: HighLevelCategory,
    ) -> f64 {
        totals
            .iter()
            .filter(|(detailed, _)| self.taxonomy.high_level_of(**detailed) == Some(high_level))
            .map(|(_, balance)| *balance)
            .sum()
    }

    fn sum_group(&self, totals: &HashMap<DetailedCategory, f64>, group: SubCategory) -> f64 {
        totals
            .iter()
            .filter(|(detailed, _)| self.taxonomy.is_member(group, **detailed))
            .map(|(_, balance)| *balance)
            .sum()
    }

    /// Headline metrics over the mapped snapshot. Sums the whole slice, so
    /// pass a single-period snapshot when the ledger spans periods. Ratios
    /// with a zero denominator come back as 0.0 rather than infinity.
    pub fn dashboard_metrics(
        &self,
        records: &[LedgerRecord],
        mappings: &MappingSet,
    ) -> DashboardMetrics {
        let totals = self.balances_by_category(records, mappings, None);

        let total_assets = self.sum_high_level(&totals, HighLevelCategory::Assets);
        let total_liabilities = -self.sum_high_level(&totals, HighLevelCategory::Liabilities);
        let total_equity = -self.sum_high_level(&totals, HighLevelCategory::Equity);
        let total_revenue = -self.sum_high_level(&totals, HighLevelCategory::Revenues);
        let total_expenses = self.sum_high_level(&totals, HighLevelCategory::Expenses);

        let current_assets = self.sum_group(&totals, SubCategory::CurrentAssets);
        let current_liabilities = -self.sum_group(&totals, SubCategory::CurrentLiabilities);

        let ratio = |numerator: f64, denominator: f64| {
            if denominator == 0.0 {
                0.0
            } else {
                numerator / denominator
            }
        };

        DashboardMetrics {
            total_assets,
            total_liabilities,
            total_equity,
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
            working_capital: current_assets - current_liabilities,
            current_ratio: ratio(current_assets, current_liabilities),
            debt_to_equity: ratio(total_liabilities, total_equity),
        }
    }
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::mapping::MappingEdit;

    fn sample_records() -> Vec<LedgerRecord> {
        vec![
            LedgerRecord::new("2024-12-31", "1001", "Cash and Cash Equivalents", 500000.0, 0.0, 500000.0),
            LedgerRecord::new("2024-12-31", "1200", "Trade Receivables", 300000.0, 0.0, 300000.0),
            LedgerRecord::new("2024-12-31", "3001", "Trade Payables", 0.0, 150000.0, -150000.0),
            LedgerRecord::new("2024-12-31", "5001", "Share Capital", 0.0, 400000.0, -400000.0),
            LedgerRecord::new("2024-12-31", "6001", "Revenue", 0.0, 1000000.0, -1000000.0),
            LedgerRecord::new("2024-12-31", "8001", "Operating Expenses", 750000.0, 0.0, 750000.0),
        ]
    }

    fn mapped(records: &[LedgerRecord]) -> MappingSet {
        MappingSet::from_records(records).bulk_auto_map(&Classifier::with_defaults())
    }

    #[test]
    fn test_balance_sheet_lines_follow_taxonomy_order() {
        let records = sample_records();
        let mappings = mapped(&records);
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::BalanceSheet, "2024-12-31", &records, &mappings, None);

        let categories: Vec<&str> = statement.lines.iter().map(|l| l.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "Trade Receivables (net)",
                "Cash and Cash Equivalents",
                "Share Capital",
                "Trade Payables",
            ]
        );

        // Credit-balance lines are presented positive
        let payables = &statement.lines[3];
        assert_eq!(payables.sub_category, "Current Liabilities");
        assert_eq!(payables.amount, 150000.0);
        assert!(payables.previous_amount.is_none());
    }

    #[test]
    fn test_income_statement_amounts() {
        let records = sample_records();
        let mappings = mapped(&records);
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::IncomeStatement, "2024-12-31", &records, &mappings, None);

        let revenue = statement.lines.iter().find(|l| l.category == "Revenues").unwrap();
        assert_eq!(revenue.amount, 1000000.0);

        let expenses = statement
            .lines
            .iter()
            .find(|l| l.category == "General and Administrative Expenses")
            .unwrap();
        assert_eq!(expenses.amount, 750000.0);
    }

    #[test]
    fn test_variance_against_previous_period() {
        let records = sample_records();
        let mappings = mapped(&records);
        let builder = StatementBuilder::new();

        let mut previous = sample_records();
        previous[4].balance = -850000.0; // prior-year revenue

        let statement = builder.build(
            Statement::IncomeStatement,
            "2024-12-31",
            &records,
            &mappings,
            Some(&previous),
        );

        let revenue = statement.lines.iter().find(|l| l.category == "Revenues").unwrap();
        assert_eq!(revenue.previous_amount, Some(850000.0));
        assert_eq!(revenue.variance, Some(150000.0));
        let pct = revenue.variance_percent.unwrap();
        assert!((pct - 17.647).abs() < 0.01);
    }

    #[test]
    fn test_unmapped_accounts_contribute_nothing() {
        let records = sample_records();
        let mappings = MappingSet::from_records(&records); // nothing mapped
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::BalanceSheet, "2024-12-31", &records, &mappings, None);
        assert!(statement.lines.is_empty());
    }

    #[test]
    fn test_dual_membership_category_produces_one_line() {
        let records = vec![LedgerRecord::new(
            "2024-12-31", "2100", "Deferred revenue", 0.0, 50000.0, -50000.0,
        )];
        let mappings = MappingSet::from_records(&records)
            .reassign_detailed("2100", DetailedCategory::ContractLiabilities);
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::BalanceSheet, "2024-12-31", &records, &mappings, None);

        let lines: Vec<_> = statement
            .lines
            .iter()
            .filter(|l| l.category == "Contract Liabilities")
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, 50000.0);
        // Nothing pinned: the first owning group wins
        assert_eq!(lines[0].sub_category, "Non-current Liabilities");
    }

    #[test]
    fn test_dual_membership_category_follows_pinned_group() {
        let records = vec![LedgerRecord::new(
            "2024-12-31", "2100", "Deferred revenue", 0.0, 50000.0, -50000.0,
        )];
        let mappings = MappingSet::from_records(&records)
            .apply_edit(
                "2100",
                MappingEdit::SubCategory(Some(SubCategory::CurrentLiabilities)),
            )
            .apply_edit(
                "2100",
                MappingEdit::Detailed(Some(DetailedCategory::ContractLiabilities)),
            );
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::BalanceSheet, "2024-12-31", &records, &mappings, None);

        let lines: Vec<_> = statement
            .lines
            .iter()
            .filter(|l| l.category == "Contract Liabilities")
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].sub_category, "Current Liabilities");
        assert_eq!(lines[0].amount, 50000.0);
    }

    #[test]
    fn test_build_ignores_records_from_other_periods() {
        let mut records = sample_records();
        records.push(LedgerRecord::new(
            "2025-03-31", "1001", "Cash and Cash Equivalents", 520000.0, 0.0, 520000.0,
        ));
        let mappings = mapped(&records);
        let builder = StatementBuilder::new();

        let statement =
            builder.build(Statement::BalanceSheet, "2024-12-31", &records, &mappings, None);

        let cash = statement
            .lines
            .iter()
            .find(|l| l.category == "Cash and Cash Equivalents")
            .unwrap();
        assert_eq!(cash.amount, 500000.0);
    }

    #[test]
    fn test_dashboard_metrics() {
        let records = sample_records();
        let mappings = mapped(&records);
        let builder = StatementBuilder::new();

        let metrics = builder.dashboard_metrics(&records, &mappings);

        assert_eq!(metrics.total_assets, 800000.0);
        assert_eq!(metrics.total_liabilities, 150000.0);
        assert_eq!(metrics.total_equity, 400000.0);
        assert_eq!(metrics.total_revenue, 1000000.0);
        assert_eq!(metrics.total_expenses, 750000.0);
        assert_eq!(metrics.net_income, 250000.0);
        assert_eq!(metrics.working_capital, 650000.0);
        assert!((metrics.current_ratio - 800000.0 / 150000.0).abs() < 1e-9);
        assert!((metrics.debt_to_equity - 0.375).abs() < 1e-9);
    }

    #[test]
    fn test_ratios_guard_zero_denominators() {
        let builder = StatementBuilder::new();
        let metrics = builder.dashboard_metrics(&[], &MappingSet::new());

        assert_eq!(metrics.current_ratio, 0.0);
        assert_eq!(metrics.debt_to_equity, 0.0);
    }
}
