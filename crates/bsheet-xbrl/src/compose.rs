//! Bottom-up composition.

use bsheet_core::Amount;
use tracing::debug;

use crate::{
    concept::{Component, Concept},
    index::FactIndex,
    resolve::{resolve, resolve_set},
};

/// Resolves one component, zero when nothing usable is present.
#[must_use]
pub fn resolve_component(component: &Component, index: &FactIndex) -> Amount {
    match component {
        Component::Line(set) => resolve_set(set, index),
        Component::Subtotal(set, parts) => {
            let subtotal = resolve_set(set, index);
            if subtotal != 0 {
                return subtotal;
            }
            parts
                .iter()
                .map(|part| resolve_set(part, index))
                .fold(0, Amount::saturating_add)
        }
    }
}

/// Resolves `concept` directly, or sums `components` if that gives zero.
///
/// Missing components add zero.
#[must_use]
pub fn compose_or_fallback(
    concept: Concept,
    components: &[Component],
    index: &FactIndex,
) -> Amount {
    let direct = resolve(concept, index);
    if direct != 0 || components.is_empty() {
        return direct;
    }

    let composed = components
        .iter()
        .map(|c| resolve_component(c, index))
        .fold(0, Amount::saturating_add);
    if composed != 0 {
        debug!(%concept, composed, "Composed from components");
    }
    composed
}

/// Resolves `concept` with its own components.
#[must_use]
pub fn compose(concept: Concept, index: &FactIndex) -> Amount {
    compose_or_fallback(concept, concept.components(), index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Fact;

    fn index(facts: &[(&str, f64)]) -> FactIndex {
        FactIndex::from_facts(
            facts
                .iter()
                .map(|(tag, v)| Fact::new(tag, "CurrentYearInstant", *v))
                .collect(),
        )
    }

    #[test]
    fn test_direct_value_wins() {
        let idx = index(&[
            ("CurrentAssets", 900.0),
            ("CashAndDeposits", 100.0),
            ("Inventories", 50.0),
        ]);
        assert_eq!(compose(Concept::CurrentAssets, &idx), 900);
    }

    #[test]
    fn test_sums_components_when_direct_missing() {
        let idx = index(&[
            ("CashAndDeposits", 100.0),
            ("NotesAndAccountsReceivableTrade", 250.0),
            ("Inventories", 50.0),
            ("AllowanceForDoubtfulAccountsCA", -5.0),
        ]);
        assert_eq!(compose(Concept::CurrentAssets, &idx), 395);
    }

    #[test]
    fn test_groups_fall_back_to_ifrs_individually() {
        let idx = index(&[("CashAndDeposits", 100.0), ("InventoriesCAIFRS", 70.0)]);
        assert_eq!(compose(Concept::CurrentAssets, &idx), 170);
    }

    #[test]
    fn test_monotonic_fallback() {
        // Adding a direct value never lowers a composed result to zero.
        let composed_only = index(&[("Land", 40.0), ("BuildingsAndStructuresNet", 60.0)]);
        assert_eq!(compose(Concept::PropertyPlantAndEquipment, &composed_only), 100);

        let with_direct = index(&[
            ("Land", 40.0),
            ("BuildingsAndStructuresNet", 60.0),
            ("PropertyPlantAndEquipment", 120.0),
        ]);
        assert_eq!(compose(Concept::PropertyPlantAndEquipment, &with_direct), 120);
    }

    #[test]
    fn test_nothing_present_is_zero() {
        let idx = FactIndex::default();
        for concept in Concept::ALL {
            assert_eq!(compose(*concept, &idx), 0);
        }
    }

    #[test]
    fn test_ifrs_owners_equity_is_not_double_counted() {
        let idx = index(&[
            ("EquityAttributableToOwnersOfParentIFRS", 900.0),
            ("OtherComponentsOfEquityIFRS", 100.0),
            ("NonControllingInterestsIFRS", 50.0),
        ]);
        assert_eq!(compose(Concept::NetAssets, &idx), 950);
    }

    #[test]
    fn test_reported_subtotal_replaces_its_parts() {
        let idx = index(&[("BondsAndBorrowingsNCLIFRS", 500.0), ("BondsIssued", 200.0)]);
        assert_eq!(compose(Concept::NonCurrentLiabilities, &idx), 500);
        assert_eq!(compose(Concept::InterestBearingDebt, &idx), 500);

        let idx = index(&[("BondsIssued", 200.0), ("LongtermBorrowings", 300.0)]);
        assert_eq!(compose(Concept::NonCurrentLiabilities, &idx), 500);
    }

    #[test]
    fn test_current_assets_use_split_receivables() {
        let idx = index(&[
            ("CashAndDeposits", 100.0),
            ("NotesReceivableTrade", 20.0),
            ("AccountsReceivableTrade", 80.0),
            ("MerchandiseAndFinishedGoods", 30.0),
            ("RawMaterialsAndSupplies", 10.0),
        ]);
        assert_eq!(compose(Concept::CurrentAssets, &idx), 240);
        assert_eq!(compose(Concept::Receivables, &idx), 100);
    }

    #[test]
    fn test_subtotal_wins_over_parts() {
        let idx = index(&[
            ("NotesAndAccountsReceivableTrade", 120.0),
            ("NotesReceivableTrade", 20.0),
            ("AccountsReceivableTrade", 80.0),
        ]);
        assert_eq!(compose(Concept::CurrentAssets, &idx), 120);
    }

    #[test]
    fn test_explicit_groups() {
        let idx = index(&[("Goodwill", 30.0), ("Software", 12.0)]);
        assert_eq!(
            compose_or_fallback(Concept::IntangibleAssets, Concept::IntangibleAssets.components(), &idx),
            42
        );
        assert_eq!(compose_or_fallback(Concept::IntangibleAssets, &[], &idx), 0);
    }
}
