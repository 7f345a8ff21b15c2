// 🗂️ Taxonomy - Fixed three-level financial reporting structure
// statement → group → detailed category, with reverse lookup to the
// five high-level categories (Assets/Liabilities/Equity/Revenues/Expenses)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// STATEMENT (Level 0)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statement {
    #[serde(rename = "balance")]
    BalanceSheet,
    #[serde(rename = "income")]
    IncomeStatement,
    #[serde(rename = "cashflow")]
    CashFlowStatement,
}

impl Statement {
    pub const ALL: [Statement; 3] = [
        Statement::BalanceSheet,
        Statement::IncomeStatement,
        Statement::CashFlowStatement,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Statement::BalanceSheet => "Balance Sheet",
            Statement::IncomeStatement => "Income Statement",
            Statement::CashFlowStatement => "Cash Flow Statement",
        }
    }
}

// ============================================================================
// HIGH-LEVEL CATEGORY (Level 1)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLevelCategory {
    Assets,
    Liabilities,
    Equity,
    Revenues,
    Expenses,
}

impl HighLevelCategory {
    pub const ALL: [HighLevelCategory; 5] = [
        HighLevelCategory::Assets,
        HighLevelCategory::Liabilities,
        HighLevelCategory::Equity,
        HighLevelCategory::Revenues,
        HighLevelCategory::Expenses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HighLevelCategory::Assets => "Assets",
            HighLevelCategory::Liabilities => "Liabilities",
            HighLevelCategory::Equity => "Equity",
            HighLevelCategory::Revenues => "Revenues",
            HighLevelCategory::Expenses => "Expenses",
        }
    }

    /// Parse from a display name. Unknown names resolve to `None`, never an
    /// error - callers may be holding transient unclassified state.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

// ============================================================================
// SUB-CATEGORY (Level 2 - statement groups)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCategory {
    NonCurrentAssets,
    CurrentAssets,
    Equity,
    NonCurrentLiabilities,
    CurrentLiabilities,
    RevenueAndIncome,
    CostsAndExpenses,
    OperatingActivities,
    InvestingActivities,
    FinancingActivities,
}

impl SubCategory {
    pub fn name(&self) -> &'static str {
        match self {
            SubCategory::NonCurrentAssets => "Non-current Assets",
            SubCategory::CurrentAssets => "Current Assets",
            SubCategory::Equity => "Equity",
            SubCategory::NonCurrentLiabilities => "Non-current Liabilities",
            SubCategory::CurrentLiabilities => "Current Liabilities",
            SubCategory::RevenueAndIncome => "Revenue & Income",
            SubCategory::CostsAndExpenses => "Costs & Expenses",
            SubCategory::OperatingActivities => "Operating Activities",
            SubCategory::InvestingActivities => "Investing Activities",
            SubCategory::FinancingActivities => "Financing Activities",
        }
    }

    /// Statement this group belongs to
    pub fn statement(&self) -> Statement {
        match self {
            SubCategory::NonCurrentAssets
            | SubCategory::CurrentAssets
            | SubCategory::Equity
            | SubCategory::NonCurrentLiabilities
            | SubCategory::CurrentLiabilities => Statement::BalanceSheet,
            SubCategory::RevenueAndIncome | SubCategory::CostsAndExpenses => {
                Statement::IncomeStatement
            }
            SubCategory::OperatingActivities
            | SubCategory::InvestingActivities
            | SubCategory::FinancingActivities => Statement::CashFlowStatement,
        }
    }

    /// Owning high-level category. Cash-flow groups reuse balance-sheet and
    /// income-statement line items, so they own no high-level category.
    pub fn high_level(&self) -> Option<HighLevelCategory> {
        match self {
            SubCategory::NonCurrentAssets | SubCategory::CurrentAssets => {
                Some(HighLevelCategory::Assets)
            }
            SubCategory::Equity => Some(HighLevelCategory::Equity),
            SubCategory::NonCurrentLiabilities | SubCategory::CurrentLiabilities => {
                Some(HighLevelCategory::Liabilities)
            }
            SubCategory::RevenueAndIncome => Some(HighLevelCategory::Revenues),
            SubCategory::CostsAndExpenses => Some(HighLevelCategory::Expenses),
            SubCategory::OperatingActivities
            | SubCategory::InvestingActivities
            | SubCategory::FinancingActivities => None,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        GROUPS
            .iter()
            .map(|(group, _)| *group)
            .find(|g| g.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl Serialize for SubCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for SubCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        SubCategory::parse(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown sub-category: {}", name)))
    }
}

// ============================================================================
// DETAILED CATEGORY (Level 3 - statement line items)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailedCategory {
    // Non-current Assets
    PropertyPlantAndEquipment,
    RightOfUseAssets,
    InvestmentProperty,
    IntangibleAssets,
    Goodwill,
    InvestmentsInAssociates,
    FinancialAssetsNonCurrent,
    ContractAssets,
    DeferredTaxAssets,
    OtherNonCurrentAssets,
    // Current Assets
    TradeReceivables,
    OtherReceivables,
    AccruedIncome,
    Inventories,
    Prepayments,
    FinancialAssetsCurrent,
    CurrentTaxAssets,
    CashAndCashEquivalents,
    AssetsHeldForSale,
    // Equity
    ShareCapital,
    SharePremium,
    OtherReserves,
    RetainedEarnings,
    NonControllingInterests,
    RevaluationReserves,
    TranslationReserves,
    HedgingReserves,
    FairValueOciReserves,
    // Liabilities (ContractLiabilities is shared by both liability groups)
    LeaseLiabilitiesNonCurrent,
    ProvisionsNonCurrent,
    ContractLiabilities,
    BorrowingsNonCurrent,
    DeferredTaxLiabilities,
    OtherNonCurrentLiabilities,
    BorrowingsCurrent,
    LeaseLiabilitiesCurrent,
    ProvisionsCurrent,
    TradePayables,
    OtherPayables,
    AccruedExpenses,
    CurrentTaxLiabilities,
    LiabilitiesHeldForSale,
    // Revenue & Income
    Revenues,
    OtherOperatingIncome,
    InterestIncome,
    // Costs & Expenses
    CostOfSales,
    SellingExpenses,
    ResearchAndDevelopmentExpenses,
    GeneralAndAdministrativeExpenses,
    OtherOperatingExpenses,
    DepreciationAndAmortization,
    InterestExpense,
    IncomeTaxExpense,
    // Operating Activities
    NetIncome,
    DepreciationAmortizationAddback,
    ChangesInWorkingCapital,
    ProvisionChanges,
    OtherOperatingCashFlows,
    // Investing Activities
    CapitalExpenditures,
    AcquisitionsAndDisposals,
    InvestmentInSecurities,
    OtherInvestingCashFlows,
    // Financing Activities
    ProceedsFromBorrowings,
    RepaymentOfBorrowings,
    DividendPayments,
    ShareIssuanceRepurchase,
    OtherFinancingCashFlows,
}

impl DetailedCategory {
    pub fn name(&self) -> &'static str {
        match self {
            DetailedCategory::PropertyPlantAndEquipment => "Property, Plant and Equipment",
            DetailedCategory::RightOfUseAssets => "Right-of-Use Assets",
            DetailedCategory::InvestmentProperty => "Investment Property",
            DetailedCategory::IntangibleAssets => "Intangible Assets",
            DetailedCategory::Goodwill => "Goodwill",
            DetailedCategory::InvestmentsInAssociates => {
                "Investments in Associates and Joint Ventures"
            }
            DetailedCategory::FinancialAssetsNonCurrent => "Financial Assets (non-current)",
            DetailedCategory::ContractAssets => "Contract Assets",
            DetailedCategory::DeferredTaxAssets => "Deferred Tax Assets",
            DetailedCategory::OtherNonCurrentAssets => "Other Non-current Assets",
            DetailedCategory::TradeReceivables => "Trade Receivables (net)",
            DetailedCategory::OtherReceivables => "Other Receivables",
            DetailedCategory::AccruedIncome => "Accrued Income",
            DetailedCategory::Inventories => "Inventories",
            DetailedCategory::Prepayments => "Prepayments",
            DetailedCategory::FinancialAssetsCurrent => "Financial Assets (current)",
            DetailedCategory::CurrentTaxAssets => "Current Tax Assets",
            DetailedCategory::CashAndCashEquivalents => "Cash and Cash Equivalents",
            DetailedCategory::AssetsHeldForSale => "Assets Held for Sale",
            DetailedCategory::ShareCapital => "Share Capital",
            DetailedCategory::SharePremium => "Share Premium",
            DetailedCategory::OtherReserves => "Other Reserves",
            DetailedCategory::RetainedEarnings => "Retained Earnings",
            DetailedCategory::NonControllingInterests => "Non-controlling Interests",
            DetailedCategory::RevaluationReserves => "Revaluation Reserves",
            DetailedCategory::TranslationReserves => "Translation Reserves",
            DetailedCategory::HedgingReserves => "Hedging Reserves",
            DetailedCategory::FairValueOciReserves => "Fair Value through OCI Reserves",
            DetailedCategory::LeaseLiabilitiesNonCurrent => "Lease Liabilities (non-current)",
            DetailedCategory::ProvisionsNonCurrent => "Provisions (non-current)",
            DetailedCategory::ContractLiabilities => "Contract Liabilities",
            DetailedCategory::BorrowingsNonCurrent => {
                "Borrowings and Other Financial Liabilities (non-current)"
            }
            DetailedCategory::DeferredTaxLiabilities => "Deferred Tax Liabilities",
            DetailedCategory::OtherNonCurrentLiabilities => "Other Non-current Liabilities",
            DetailedCategory::BorrowingsCurrent => {
                "Borrowings and Other Financial Liabilities (current)"
            }
            DetailedCategory::LeaseLiabilitiesCurrent => "Lease Liabilities (current)",
            DetailedCategory::ProvisionsCurrent => "Provisions (current)",
            DetailedCategory::TradePayables => "Trade Payables",
            DetailedCategory::OtherPayables => "Other Payables",
            DetailedCategory::AccruedExpenses => "Accrued Expenses",
            DetailedCategory::CurrentTaxLiabilities => "Current Tax Liabilities",
            DetailedCategory::LiabilitiesHeldForSale => {
                "Liabilities Related to Assets Held for Sale"
            }
            DetailedCategory::Revenues => "Revenues",
            DetailedCategory::OtherOperatingIncome => "Other Operating Income",
            DetailedCategory::InterestIncome => "Interest Income",
            DetailedCategory::CostOfSales => "Cost of Sales",
            DetailedCategory::SellingExpenses => "Selling Expenses",
            DetailedCategory::ResearchAndDevelopmentExpenses => {
                "Research & Development Expenses"
            }
            DetailedCategory::GeneralAndAdministrativeExpenses => {
                "General and Administrative Expenses"
            }
            DetailedCategory::OtherOperatingExpenses => "Other Operating Expenses",
            DetailedCategory::DepreciationAndAmortization => "Depreciation & Amortization",
            DetailedCategory::InterestExpense => "Interest Expense",
            DetailedCategory::IncomeTaxExpense => "Income Tax Expense",
            DetailedCategory::NetIncome => "Net Income",
            DetailedCategory::DepreciationAmortizationAddback => {
                "Depreciation and Amortization"
            }
            DetailedCategory::ChangesInWorkingCapital => "Changes in Working Capital",
            DetailedCategory::ProvisionChanges => "Provision Changes",
            DetailedCategory::OtherOperatingCashFlows => "Other Operating Cash Flows",
            DetailedCategory::CapitalExpenditures => "Capital Expenditures",
            DetailedCategory::AcquisitionsAndDisposals => "Acquisitions and Disposals",
            DetailedCategory::InvestmentInSecurities => "Investment in Securities",
            DetailedCategory::OtherInvestingCashFlows => "Other Investing Cash Flows",
            DetailedCategory::ProceedsFromBorrowings => "Proceeds from Borrowings",
            DetailedCategory::RepaymentOfBorrowings => "Repayment of Borrowings",
            DetailedCategory::DividendPayments => "Dividend Payments",
            DetailedCategory::ShareIssuanceRepurchase => "Share Issuance/Repurchase",
            DetailedCategory::OtherFinancingCashFlows => "Other Financing Cash Flows",
        }
    }

    /// Parse from a display name (case-insensitive). Unknown names resolve to
    /// `None` - transient unclassified state must not crash the engine.
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = name.trim();
        GROUPS
            .iter()
            .flat_map(|(_, members)| members.iter().copied())
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
    }
}

impl Serialize for DetailedCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DetailedCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        DetailedCategory::parse(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown detailed category: {}", name)))
    }
}

// ============================================================================
// MEMBERSHIP TABLES (the tree, in presentation order)
// ============================================================================

const NON_CURRENT_ASSETS: &[DetailedCategory] = &[
    DetailedCategory::PropertyPlantAndEquipment,
    DetailedCategory::RightOfUseAssets,
    DetailedCategory::InvestmentProperty,
    DetailedCategory::IntangibleAssets,
    DetailedCategory::Goodwill,
    DetailedCategory::InvestmentsInAssociates,
    DetailedCategory::FinancialAssetsNonCurrent,
    DetailedCategory::ContractAssets,
    DetailedCategory::DeferredTaxAssets,
    DetailedCategory::OtherNonCurrentAssets,
];

const CURRENT_ASSETS: &[DetailedCategory] = &[
    DetailedCategory::TradeReceivables,
    DetailedCategory::OtherReceivables,
    DetailedCategory::AccruedIncome,
    DetailedCategory::Inventories,
    DetailedCategory::Prepayments,
    DetailedCategory::FinancialAssetsCurrent,
    DetailedCategory::CurrentTaxAssets,
    DetailedCategory::CashAndCashEquivalents,
    DetailedCategory::AssetsHeldForSale,
];

const EQUITY: &[DetailedCategory] = &[
    DetailedCategory::ShareCapital,
    DetailedCategory::SharePremium,
    DetailedCategory::OtherReserves,
    DetailedCategory::RetainedEarnings,
    DetailedCategory::NonControllingInterests,
    DetailedCategory::RevaluationReserves,
    DetailedCategory::TranslationReserves,
    DetailedCategory::HedgingReserves,
    DetailedCategory::FairValueOciReserves,
];

const NON_CURRENT_LIABILITIES: &[DetailedCategory] = &[
    DetailedCategory::LeaseLiabilitiesNonCurrent,
    DetailedCategory::ProvisionsNonCurrent,
    DetailedCategory::ContractLiabilities,
    DetailedCategory::BorrowingsNonCurrent,
    DetailedCategory::DeferredTaxLiabilities,
    DetailedCategory::OtherNonCurrentLiabilities,
];

const CURRENT_LIABILITIES: &[DetailedCategory] = &[
    DetailedCategory::BorrowingsCurrent,
    DetailedCategory::LeaseLiabilitiesCurrent,
    DetailedCategory::ProvisionsCurrent,
    DetailedCategory::ContractLiabilities,
    DetailedCategory::TradePayables,
    DetailedCategory::OtherPayables,
    DetailedCategory::AccruedExpenses,
    DetailedCategory::CurrentTaxLiabilities,
    DetailedCategory::LiabilitiesHeldForSale,
];

const REVENUE_AND_INCOME: &[DetailedCategory] = &[
    DetailedCategory::Revenues,
    DetailedCategory::OtherOperatingIncome,
    DetailedCategory::InterestIncome,
];

const COSTS_AND_EXPENSES: &[DetailedCategory] = &[
    DetailedCategory::CostOfSales,
    DetailedCategory::SellingExpenses,
    DetailedCategory::ResearchAndDevelopmentExpenses,
    DetailedCategory::GeneralAndAdministrativeExpenses,
    DetailedCategory::OtherOperatingExpenses,
    DetailedCategory::DepreciationAndAmortization,
    DetailedCategory::InterestExpense,
    DetailedCategory::IncomeTaxExpense,
];

const OPERATING_ACTIVITIES: &[DetailedCategory] = &[
    DetailedCategory::NetIncome,
    DetailedCategory::DepreciationAmortizationAddback,
    DetailedCategory::ChangesInWorkingCapital,
    DetailedCategory::ProvisionChanges,
    DetailedCategory::OtherOperatingCashFlows,
];

const INVESTING_ACTIVITIES: &[DetailedCategory] = &[
    DetailedCategory::CapitalExpenditures,
    DetailedCategory::AcquisitionsAndDisposals,
    DetailedCategory::InvestmentInSecurities,
    DetailedCategory::OtherInvestingCashFlows,
];

const FINANCING_ACTIVITIES: &[DetailedCategory] = &[
    DetailedCategory::ProceedsFromBorrowings,
    DetailedCategory::RepaymentOfBorrowings,
    DetailedCategory::DividendPayments,
    DetailedCategory::ShareIssuanceRepurchase,
    DetailedCategory::OtherFinancingCashFlows,
];

const GROUPS: &[(SubCategory, &[DetailedCategory])] = &[
    (SubCategory::NonCurrentAssets, NON_CURRENT_ASSETS),
    (SubCategory::CurrentAssets, CURRENT_ASSETS),
    (SubCategory::Equity, EQUITY),
    (SubCategory::NonCurrentLiabilities, NON_CURRENT_LIABILITIES),
    (SubCategory::CurrentLiabilities, CURRENT_LIABILITIES),
    (SubCategory::RevenueAndIncome, REVENUE_AND_INCOME),
    (SubCategory::CostsAndExpenses, COSTS_AND_EXPENSES),
    (SubCategory::OperatingActivities, OPERATING_ACTIVITIES),
    (SubCategory::InvestingActivities, INVESTING_ACTIVITIES),
    (SubCategory::FinancingActivities, FINANCING_ACTIVITIES),
];

// ============================================================================
// TAXONOMY
// ============================================================================

/// Read-only view over the fixed category tree.
///
/// All lookups are infallible: unknown names resolve to `None` rather than
/// raising, since category data passed through the UI may be in a transient
/// unclassified state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Taxonomy;

impl Taxonomy {
    pub fn new() -> Self {
        Taxonomy
    }

    pub fn statements(&self) -> &'static [Statement] {
        &Statement::ALL
    }

    /// Groups of a statement, in presentation order
    pub fn groups_of(&self, statement: Statement) -> Vec<SubCategory> {
        GROUPS
            .iter()
            .map(|(group, _)| *group)
            .filter(|g| g.statement() == statement)
            .collect()
    }

    /// Ordered member list of a group
    pub fn categories_of(&self, group: SubCategory) -> &'static [DetailedCategory] {
        GROUPS
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, members)| *members)
            .unwrap_or(&[])
    }

    pub fn is_member(&self, group: SubCategory, detailed: DetailedCategory) -> bool {
        self.categories_of(group).contains(&detailed)
    }

    /// Reverse lookup: owning high-level category of a detailed category.
    /// Cash-flow line items own no high-level category and resolve to `None`.
    pub fn high_level_of(&self, detailed: DetailedCategory) -> Option<HighLevelCategory> {
        GROUPS
            .iter()
            .filter(|(_, members)| members.contains(&detailed))
            .find_map(|(group, _)| group.high_level())
    }

    /// Groups the detailed category is a member of (usually one; "Contract
    /// Liabilities" belongs to both liability groups)
    pub fn groups_containing(&self, detailed: DetailedCategory) -> Vec<SubCategory> {
        GROUPS
            .iter()
            .filter(|(_, members)| members.contains(&detailed))
            .map(|(group, _)| *group)
            .collect()
    }

    pub fn detailed_from_name(&self, name: &str) -> Option<DetailedCategory> {
        DetailedCategory::parse(name)
    }
}

// ============================================================================
// TESTS
// ============================================================================
