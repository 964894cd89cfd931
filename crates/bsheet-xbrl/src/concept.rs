//! Balance sheet concepts and their tag aliases.
//!
//! Every [`Concept`] has one [`AliasSet`] of direct tags, the domestic
//! taxonomy first and IFRS second, plus the [`Component`]s used to compose it
//! bottom-up when no direct tag resolves. Components of one concept never
//! overlap: a subtotal and its parts are alternatives, not addends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered local tag names for one figure under both taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasSet {
    /// Domestic (Japanese GAAP) taxonomy names, tried first.
    pub domestic: &'static [&'static str],
    /// IFRS taxonomy names, tried when the domestic names resolve to zero.
    pub ifrs: &'static [&'static str],
}

impl AliasSet {
    /// Creates an alias set.
    #[must_use]
    pub const fn new(domestic: &'static [&'static str], ifrs: &'static [&'static str]) -> Self {
        Self { domestic, ifrs }
    }
}

/// One term of a bottom-up composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// A single line.
    Line(AliasSet),
    /// A reported subtotal, or the sum of its parts when the subtotal is absent.
    Subtotal(AliasSet, &'static [AliasSet]),
}

// Asset components
const CASH: AliasSet = AliasSet::new(
    &["CashAndDeposits", "CashAndCashEquivalents"],
    &["CashAndCashEquivalents", "CashAndCashEquivalentsIFRS"],
);
const RECEIVABLES: AliasSet = AliasSet::new(
    &[
        "NotesAndAccountsReceivableTrade",
        "NotesAndAccountsReceivableTradeAndContractAssets",
    ],
    &["TradeAndOtherCurrentReceivables", "TradeAndOtherReceivablesCAIFRS"],
);
const NOTES_RECEIVABLE: AliasSet = AliasSet::new(&["NotesReceivableTrade"], &[]);
const ACCOUNTS_RECEIVABLE: AliasSet = AliasSet::new(
    &["AccountsReceivableTrade", "AccountsReceivableTradeAndContractAssets"],
    &[],
);
const ELECTRONIC_RECEIVABLES: AliasSet =
    AliasSet::new(&["ElectronicallyRecordedMonetaryClaimsOperatingCA"], &[]);
const INVENTORIES: AliasSet = AliasSet::new(&["Inventories"], &["Inventories", "InventoriesCAIFRS"]);
const MERCHANDISE: AliasSet = AliasSet::new(&["MerchandiseAndFinishedGoods", "Merchandise"], &[]);
const WORK_IN_PROCESS: AliasSet = AliasSet::new(&["WorkInProcess"], &[]);
const RAW_MATERIALS: AliasSet = AliasSet::new(&["RawMaterialsAndSupplies", "RawMaterials"], &[]);
const SECURITIES: AliasSet = AliasSet::new(
    &["ShortTermInvestmentSecurities", "Securities"],
    &["OtherCurrentFinancialAssets", "OtherFinancialAssetsCAIFRS"],
);
const OTHER_CURRENT_ASSETS: AliasSet = AliasSet::new(
    &["OtherCA"],
    &["OtherCurrentAssets", "OtherCurrentAssetsIFRS"],
);
const ALLOWANCE_CURRENT: AliasSet = AliasSet::new(&["AllowanceForDoubtfulAccountsCA"], &[]);

const PPE: AliasSet = AliasSet::new(
    &["PropertyPlantAndEquipment"],
    &["PropertyPlantAndEquipment", "PropertyPlantAndEquipmentIFRS"],
);
const BUILDINGS: AliasSet = AliasSet::new(&["BuildingsAndStructuresNet"], &[]);
const MACHINERY: AliasSet = AliasSet::new(&["MachineryEquipmentAndVehiclesNet"], &[]);
const TOOLS: AliasSet = AliasSet::new(&["ToolsFurnitureAndFixturesNet"], &[]);
const LAND: AliasSet = AliasSet::new(&["Land"], &[]);
const CONSTRUCTION: AliasSet = AliasSet::new(&["ConstructionInProgress"], &[]);
const INTANGIBLES: AliasSet = AliasSet::new(
    &["IntangibleAssets"],
    &["IntangibleAssetsOtherThanGoodwill", "IntangibleAssetsIFRS"],
);
const GOODWILL: AliasSet = AliasSet::new(&["Goodwill"], &[]);
// Under IFRS goodwill sits outside intangible assets.
const GOODWILL_SEPARATE: AliasSet = AliasSet::new(&[], &["GoodwillIFRS"]);
const SOFTWARE: AliasSet = AliasSet::new(&["Software"], &[]);
const INVESTMENTS_AND_OTHER: AliasSet = AliasSet::new(
    &["InvestmentsAndOtherAssets"],
    &["OtherNonCurrentFinancialAssets", "OtherFinancialAssetsNCAIFRS"],
);
const INVESTMENT_SECURITIES: AliasSet = AliasSet::new(&["InvestmentSecurities"], &[]);
const LONG_TERM_LOANS_RECEIVABLE: AliasSet = AliasSet::new(&["LongTermLoansReceivable"], &[]);
const DEFERRED_TAX_ASSETS: AliasSet = AliasSet::new(&["DeferredTaxAssets"], &[]);
const EQUITY_METHOD_INVESTMENTS: AliasSet = AliasSet::new(
    &[],
    &[
        "InvestmentsAccountedForUsingEquityMethod",
        "InvestmentsAccountedForUsingEquityMethodIFRS",
    ],
);

// Liability components
const PAYABLES: AliasSet = AliasSet::new(
    &["NotesAndAccountsPayableTrade"],
    &["TradeAndOtherCurrentPayables", "TradeAndOtherPayablesCLIFRS"],
);
const NOTES_PAYABLE: AliasSet = AliasSet::new(&["NotesPayableTrade"], &[]);
const ACCOUNTS_PAYABLE: AliasSet = AliasSet::new(&["AccountsPayableTrade"], &[]);
const ELECTRONIC_OBLIGATIONS: AliasSet =
    AliasSet::new(&["ElectronicallyRecordedObligationsOperatingCL"], &[]);
const SHORT_TERM_LOANS: AliasSet = AliasSet::new(
    &["ShortTermLoansPayable", "ShortTermBorrowings"],
    &["ShorttermBorrowings", "BorrowingsCLIFRS"],
);
const CURRENT_PORTION_LOANS: AliasSet = AliasSet::new(
    &["CurrentPortionOfLongTermLoansPayable"],
    &["CurrentPortionOfLongtermBorrowings"],
);
const COMMERCIAL_PAPER: AliasSet = AliasSet::new(&["CommercialPapersLiabilities"], &[]);
const CURRENT_PORTION_BONDS: AliasSet = AliasSet::new(&["CurrentPortionOfBonds"], &[]);
const INCOME_TAXES_PAYABLE: AliasSet = AliasSet::new(
    &["IncomeTaxesPayable"],
    &["CurrentTaxLiabilities", "IncomeTaxesPayableCLIFRS"],
);
const OTHER_CURRENT_LIABILITIES: AliasSet = AliasSet::new(
    &["OtherCL"],
    &["OtherCurrentLiabilities", "OtherCurrentLiabilitiesCLIFRS"],
);
const BONDS: AliasSet = AliasSet::new(&["BondsPayable"], &["BondsIssued"]);
const LONG_TERM_LOANS: AliasSet =
    AliasSet::new(&["LongTermLoansPayable"], &["LongtermBorrowings"]);
const BONDS_AND_BORROWINGS_CL: AliasSet = AliasSet::new(&[], &["BondsAndBorrowingsCLIFRS"]);
const BONDS_AND_BORROWINGS_NCL: AliasSet = AliasSet::new(&[], &["BondsAndBorrowingsNCLIFRS"]);
const RETIREMENT_BENEFITS: AliasSet = AliasSet::new(
    &["NetDefinedBenefitLiability", "ProvisionForRetirementBenefits"],
    &["RetirementBenefitLiabilityNCLIFRS", "NetDefinedBenefitLiability"],
);
const DEFERRED_TAX_LIABILITIES: AliasSet = AliasSet::new(
    &["DeferredTaxLiabilities"],
    &["DeferredTaxLiabilities", "DeferredTaxLiabilitiesIFRS"],
);
const OTHER_NON_CURRENT_LIABILITIES: AliasSet = AliasSet::new(
    &["OtherNCL"],
    &["OtherNonCurrentLiabilities", "OtherNonCurrentLiabilitiesNCLIFRS"],
);
const INTEREST_BEARING_DEBT: AliasSet =
    AliasSet::new(&["InterestBearingDebt"], &["InterestBearingLiabilities"]);

// Equity components
const SHAREHOLDERS_EQUITY: AliasSet = AliasSet::new(
    &["ShareholdersEquity"],
    &[
        "EquityAttributableToOwnersOfParent",
        "EquityAttributableToOwnersOfParentIFRS",
    ],
);
const CAPITAL_STOCK: AliasSet = AliasSet::new(&["CapitalStock"], &["IssuedCapital", "ShareCapitalIFRS"]);
const CAPITAL_SURPLUS: AliasSet = AliasSet::new(&["CapitalSurplus"], &["SharePremium", "CapitalSurplusIFRS"]);
const RETAINED_EARNINGS: AliasSet = AliasSet::new(
    &["RetainedEarnings"],
    &["RetainedEarnings", "RetainedEarningsIFRS"],
);
const TREASURY_STOCK: AliasSet = AliasSet::new(&["TreasuryStock"], &["TreasuryShares", "TreasurySharesIFRS"]);
// IFRS owners' equity already includes other components of equity.
const ACCUMULATED_OCI: AliasSet = AliasSet::new(
    &[
        "ValuationAndTranslationAdjustments",
        "AccumulatedOtherComprehensiveIncome",
    ],
    &[],
);
const SUBSCRIPTION_RIGHTS: AliasSet = AliasSet::new(&["SubscriptionRightsToShares"], &[]);
const NON_CONTROLLING_INTERESTS: AliasSet = AliasSet::new(
    &["NonControllingInterests"],
    &["NoncontrollingInterests", "NonControllingInterestsIFRS"],
);

/// A figure the extractor resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Concept {
    /// Current assets summary line.
    CurrentAssets,
    /// Non-current assets summary line.
    NonCurrentAssets,
    /// Current liabilities summary line.
    CurrentLiabilities,
    /// Non-current liabilities summary line.
    NonCurrentLiabilities,
    /// Net assets summary line.
    NetAssets,
    /// Total assets.
    TotalAssets,
    /// Total liabilities.
    TotalLiabilities,
    /// Cash and deposits.
    Cash,
    /// Trade receivables.
    Receivables,
    /// Inventories.
    Inventories,
    /// Property, plant and equipment.
    PropertyPlantAndEquipment,
    /// Intangible assets.
    IntangibleAssets,
    /// Investments and other assets.
    InvestmentsAndOtherAssets,
    /// Trade payables.
    AccountsPayable,
    /// Borrowings, bonds and commercial paper.
    InterestBearingDebt,
    /// Retained earnings.
    RetainedEarnings,
    /// Shareholders' equity.
    ShareholdersEquity,
}

impl Concept {
    /// Every concept, summary lines first.
    pub const ALL: &'static [Self] = &[
        Self::CurrentAssets,
        Self::NonCurrentAssets,
        Self::CurrentLiabilities,
        Self::NonCurrentLiabilities,
        Self::NetAssets,
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::Cash,
        Self::Receivables,
        Self::Inventories,
        Self::PropertyPlantAndEquipment,
        Self::IntangibleAssets,
        Self::InvestmentsAndOtherAssets,
        Self::AccountsPayable,
        Self::InterestBearingDebt,
        Self::RetainedEarnings,
        Self::ShareholdersEquity,
    ];

    /// Direct tag aliases.
    #[must_use]
    pub const fn aliases(self) -> AliasSet {
        match self {
            Self::CurrentAssets => {
                AliasSet::new(&["CurrentAssets"], &["AssetsCurrent", "CurrentAssetsIFRS"])
            }
            Self::NonCurrentAssets => AliasSet::new(
                &["NonCurrentAssets", "NoncurrentAssets"],
                &["AssetsNonCurrent", "NonCurrentAssetsIFRS"],
            ),
            Self::CurrentLiabilities => AliasSet::new(
                &["CurrentLiabilities"],
                &["LiabilitiesCurrent", "TotalCurrentLiabilitiesIFRS"],
            ),
            Self::NonCurrentLiabilities => AliasSet::new(
                &["NonCurrentLiabilities", "NoncurrentLiabilities"],
                &[
                    "LiabilitiesNonCurrent",
                    "NonCurrentLiabilitiesIFRS",
                    "NonCurrentLabilitiesIFRS",
                ],
            ),
            Self::NetAssets => AliasSet::new(&["NetAssets"], &["Equity", "EquityIFRS"]),
            Self::TotalAssets => AliasSet::new(&["Assets"], &["Assets", "AssetsIFRS"]),
            Self::TotalLiabilities => {
                AliasSet::new(&["Liabilities"], &["Liabilities", "LiabilitiesIFRS"])
            }
            Self::Cash => CASH,
            Self::Receivables => RECEIVABLES,
            Self::Inventories => INVENTORIES,
            Self::PropertyPlantAndEquipment => PPE,
            Self::IntangibleAssets => INTANGIBLES,
            Self::InvestmentsAndOtherAssets => INVESTMENTS_AND_OTHER,
            Self::AccountsPayable => PAYABLES,
            Self::InterestBearingDebt => INTEREST_BEARING_DEBT,
            Self::RetainedEarnings => RETAINED_EARNINGS,
            Self::ShareholdersEquity => SHAREHOLDERS_EQUITY,
        }
    }

    /// Components summed when no direct alias resolves.
    ///
    /// Totals have none: they are left to reconciliation.
    #[must_use]
    pub const fn components(self) -> &'static [Component] {
        use Component::{Line, Subtotal};

        match self {
            Self::CurrentAssets => &[
                Line(CASH),
                Subtotal(RECEIVABLES, &[NOTES_RECEIVABLE, ACCOUNTS_RECEIVABLE]),
                Line(ELECTRONIC_RECEIVABLES),
                Subtotal(INVENTORIES, &[MERCHANDISE, WORK_IN_PROCESS, RAW_MATERIALS]),
                Line(SECURITIES),
                Line(OTHER_CURRENT_ASSETS),
                Line(ALLOWANCE_CURRENT),
            ],
            Self::NonCurrentAssets => &[
                Subtotal(PPE, &[BUILDINGS, MACHINERY, TOOLS, LAND, CONSTRUCTION]),
                Subtotal(INTANGIBLES, &[GOODWILL, SOFTWARE]),
                Line(GOODWILL_SEPARATE),
                Subtotal(
                    INVESTMENTS_AND_OTHER,
                    &[INVESTMENT_SECURITIES, LONG_TERM_LOANS_RECEIVABLE, DEFERRED_TAX_ASSETS],
                ),
                Line(EQUITY_METHOD_INVESTMENTS),
            ],
            Self::CurrentLiabilities => &[
                Subtotal(PAYABLES, &[NOTES_PAYABLE, ACCOUNTS_PAYABLE]),
                Line(ELECTRONIC_OBLIGATIONS),
                Subtotal(
                    BONDS_AND_BORROWINGS_CL,
                    &[
                        SHORT_TERM_LOANS,
                        CURRENT_PORTION_LOANS,
                        COMMERCIAL_PAPER,
                        CURRENT_PORTION_BONDS,
                    ],
                ),
                Line(INCOME_TAXES_PAYABLE),
                Line(OTHER_CURRENT_LIABILITIES),
            ],
            Self::NonCurrentLiabilities => &[
                Subtotal(BONDS_AND_BORROWINGS_NCL, &[BONDS, LONG_TERM_LOANS]),
                Line(RETIREMENT_BENEFITS),
                Line(DEFERRED_TAX_LIABILITIES),
                Line(OTHER_NON_CURRENT_LIABILITIES),
            ],
            Self::NetAssets => &[
                Line(SHAREHOLDERS_EQUITY),
                Line(ACCUMULATED_OCI),
                Line(SUBSCRIPTION_RIGHTS),
                Line(NON_CONTROLLING_INTERESTS),
            ],
            Self::Receivables => &[
                Line(NOTES_RECEIVABLE),
                Line(ACCOUNTS_RECEIVABLE),
                Line(ELECTRONIC_RECEIVABLES),
            ],
            Self::Inventories => &[Line(MERCHANDISE), Line(WORK_IN_PROCESS), Line(RAW_MATERIALS)],
            Self::PropertyPlantAndEquipment => &[
                Line(BUILDINGS),
                Line(MACHINERY),
                Line(TOOLS),
                Line(LAND),
                Line(CONSTRUCTION),
            ],
            Self::IntangibleAssets => &[Line(GOODWILL), Line(SOFTWARE)],
            Self::InvestmentsAndOtherAssets => &[
                Line(INVESTMENT_SECURITIES),
                Line(LONG_TERM_LOANS_RECEIVABLE),
                Line(DEFERRED_TAX_ASSETS),
            ],
            Self::AccountsPayable => &[
                Line(NOTES_PAYABLE),
                Line(ACCOUNTS_PAYABLE),
                Line(ELECTRONIC_OBLIGATIONS),
            ],
            Self::InterestBearingDebt => &[
                Subtotal(
                    BONDS_AND_BORROWINGS_CL,
                    &[
                        SHORT_TERM_LOANS,
                        CURRENT_PORTION_LOANS,
                        COMMERCIAL_PAPER,
                        CURRENT_PORTION_BONDS,
                    ],
                ),
                Subtotal(BONDS_AND_BORROWINGS_NCL, &[BONDS, LONG_TERM_LOANS]),
            ],
            Self::ShareholdersEquity => &[
                Line(CAPITAL_STOCK),
                Line(CAPITAL_SURPLUS),
                Line(RETAINED_EARNINGS),
                Line(TREASURY_STOCK),
            ],
            Self::TotalAssets | Self::TotalLiabilities | Self::Cash | Self::RetainedEarnings => &[],
        }
    }

    /// Returns true for the five lines reconciliation balances.
    #[must_use]
    pub const fn is_summary_line(self) -> bool {
        matches!(
            self,
            Self::CurrentAssets
                | Self::NonCurrentAssets
                | Self::CurrentLiabilities
                | Self::NonCurrentLiabilities
                | Self::NetAssets
        )
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_concept_has_direct_aliases() {
        for concept in Concept::ALL {
            let aliases = concept.aliases();
            assert!(
                !aliases.domestic.is_empty() || !aliases.ifrs.is_empty(),
                "{concept} has no aliases"
            );
        }
    }

    #[test]
    fn test_summary_lines() {
        let lines: Vec<_> = Concept::ALL
            .iter()
            .filter(|c| c.is_summary_line())
            .collect();
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_totals_are_not_composed() {
        assert!(Concept::TotalAssets.components().is_empty());
        assert!(Concept::TotalLiabilities.components().is_empty());
    }

    #[test]
    fn test_components_never_overlap() {
        for concept in Concept::ALL {
            let mut seen = HashSet::new();
            for component in concept.components() {
                let sets: Vec<&AliasSet> = match component {
                    Component::Line(set) => vec![set],
                    Component::Subtotal(set, parts) => {
                        std::iter::once(set).chain(parts.iter()).collect()
                    }
                };
                for set in sets {
                    let names: HashSet<&str> =
                        set.domestic.iter().chain(set.ifrs).copied().collect();
                    for name in names {
                        assert!(seen.insert(name), "{concept}: {name} is counted twice");
                    }
                }
            }
        }
    }

    #[test]
    fn test_domestic_names_come_first() {
        let ca = Concept::CurrentAssets.aliases();
        assert_eq!(ca.domestic, &["CurrentAssets"]);
        assert_eq!(ca.ifrs[0], "AssetsCurrent");
    }
}
