//! Draft balance sheet assembly.

use bsheet_core::{Amount, BalanceSheet, reconcile};
use tracing::{debug, instrument};

use crate::{compose::compose, concept::Concept, index::FactIndex};

/// Fills the figures of a record from a fact index, without reconciling.
///
/// Identity fields of `record` are kept as given.
#[must_use]
pub fn fill_figures(mut record: BalanceSheet, index: &FactIndex) -> BalanceSheet {
    for concept in Concept::ALL {
        let value = compose(*concept, index);
        assign(&mut record, *concept, value);
    }
    record
}

/// Builds a draft record from a fact index.
#[must_use]
pub fn draft(index: &FactIndex) -> BalanceSheet {
    fill_figures(BalanceSheet::default(), index)
}

/// Resolves all figures of `record` from `index` and reconciles them.
#[must_use]
#[instrument(skip_all, fields(facts = index.len()))]
pub fn extract_balance_sheet(record: BalanceSheet, index: &FactIndex) -> BalanceSheet {
    let drafted = fill_figures(record, index);
    debug!(
        current_assets = drafted.current_assets,
        non_current_assets = drafted.non_current_assets,
        current_liabilities = drafted.current_liabilities,
        non_current_liabilities = drafted.non_current_liabilities,
        net_assets = drafted.net_assets,
        total_assets = drafted.total_assets,
        total_liabilities = drafted.total_liabilities,
        "Drafted balance sheet"
    );
    reconcile(drafted)
}

fn assign(record: &mut BalanceSheet, concept: Concept, value: Amount) {
    let slot = match concept {
        Concept::CurrentAssets => &mut record.current_assets,
        Concept::NonCurrentAssets => &mut record.non_current_assets,
        Concept::CurrentLiabilities => &mut record.current_liabilities,
        Concept::NonCurrentLiabilities => &mut record.non_current_liabilities,
        Concept::NetAssets => &mut record.net_assets,
        Concept::TotalAssets => &mut record.total_assets,
        Concept::TotalLiabilities => &mut record.total_liabilities,
        Concept::Cash => &mut record.details.cash,
        Concept::Receivables => &mut record.details.receivables,
        Concept::Inventories => &mut record.details.inventories,
        Concept::PropertyPlantAndEquipment => &mut record.details.property_plant_and_equipment,
        Concept::IntangibleAssets => &mut record.details.intangible_assets,
        Concept::InvestmentsAndOtherAssets => &mut record.details.investments_and_other_assets,
        Concept::AccountsPayable => &mut record.details.accounts_payable,
        Concept::InterestBearingDebt => &mut record.details.interest_bearing_debt,
        Concept::RetainedEarnings => &mut record.details.retained_earnings,
        Concept::ShareholdersEquity => &mut record.details.shareholders_equity,
    };
    *slot = value;
}
