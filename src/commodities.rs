//! The economic-scale dataset: top UK import commodities in £ billions,
//! plus the synthetic illicit-market entry the reveal toggle gates.

use crate::config::OrderDirection;
use crate::reveal::RevealState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommodityKind {
    Legal,
    Illegal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityEntry {
    pub commodity: &'static str,
    /// £ billions per year.
    pub value: f64,
    pub kind: CommodityKind,
}

const fn legal(commodity: &'static str, value: f64) -> CommodityEntry {
    CommodityEntry {
        commodity,
        value,
        kind: CommodityKind::Legal,
    }
}

/// The fixed legal import table. Never mutated; the visible sequence
/// is always built from a copy.
pub const BASE_IMPORTS: [CommodityEntry; 10] = [
    legal("Mineral Fuels", 8.7),
    legal("Mechanical Appliances", 6.4),
    legal("Electronic Equipment", 5.3),
    legal("Precious Metals", 4.2),
    legal("Motor Vehicles", 4.1),
    legal("Pharmaceutical Products", 2.0),
    legal("Other Products", 1.6),
    legal("Plastics", 1.5),
    legal("Measuring Devices", 1.3),
    legal("Knitwear", 1.3),
];

pub const ILLICIT_MARKET: CommodityEntry = CommodityEntry {
    commodity: "Illicit Drugs",
    value: 9.4,
    kind: CommodityKind::Illegal,
};

/// The sequence the chart renders. The synthetic entry is present iff
/// the toggle is `Revealed`, and once present it is ordered exactly
/// like any other entry: one stable value sort, smallest first under
/// `Ascending`, applied uniformly regardless of toggle state.
pub fn visible_commodities(
    reveal: RevealState,
    direction: OrderDirection,
) -> Vec<CommodityEntry> {
    let mut entries: Vec<CommodityEntry> = BASE_IMPORTS.to_vec();
    if reveal == RevealState::Revealed {
        entries.push(ILLICIT_MARKET);
    }

    entries.sort_by(|a, b| a.value.total_cmp(&b.value));
    if direction == OrderDirection::Descending {
        entries.reverse();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_illicit(entries: &[CommodityEntry]) -> usize {
        entries
            .iter()
            .filter(|e| e.kind == CommodityKind::Illegal)
            .count()
    }

    #[test]
    fn test_hidden_sequence_is_the_base_set() {
        let entries = visible_commodities(
            RevealState::Hidden,
            OrderDirection::Ascending,
        );
        assert_eq!(entries.len(), 10);
        assert_eq!(count_illicit(&entries), 0);
    }

    #[test]
    fn test_reveal_appends_the_synthetic_entry_exactly_once() {
        let entries = visible_commodities(
            RevealState::Revealed,
            OrderDirection::Ascending,
        );
        assert_eq!(entries.len(), 11);
        assert_eq!(count_illicit(&entries), 1);

        let illicit = entries
            .iter()
            .find(|e| e.kind == CommodityKind::Illegal)
            .unwrap();
        assert_eq!(illicit.commodity, "Illicit Drugs");
        assert!((illicit.value - 9.4).abs() < 1e-9);
    }

    #[test]
    fn test_reset_returns_to_the_base_length() {
        // Drive the toggle through reveal and reset and check the
        // visible sequence tracks the flag at every step.
        use crate::reveal::ToggleAction;

        let mut state = RevealState::Hidden;
        assert_eq!(
            visible_commodities(state, OrderDirection::Ascending)
                .len(),
            10
        );

        state = state.transition(ToggleAction::Reveal).unwrap();
        assert_eq!(
            visible_commodities(state, OrderDirection::Ascending)
                .len(),
            11
        );

        state = state.transition(ToggleAction::Reset).unwrap();
        assert_eq!(
            visible_commodities(state, OrderDirection::Ascending)
                .len(),
            10
        );
    }

    #[test]
    fn test_ordering_is_uniform_and_unprivileged() {
        let entries = visible_commodities(
            RevealState::Revealed,
            OrderDirection::Ascending,
        );

        for pair in entries.windows(2) {
            assert!(
                pair[0].value <= pair[1].value,
                "sequence must be ascending by value"
            );
        }
        // The synthetic entry has the largest value, so under the
        // uniform rule it lands at the top end like any other entry.
        assert_eq!(
            entries.last().unwrap().commodity,
            "Illicit Drugs"
        );
    }

    #[test]
    fn test_descending_direction_reverses_the_sequence() {
        let ascending = visible_commodities(
            RevealState::Hidden,
            OrderDirection::Ascending,
        );
        let descending = visible_commodities(
            RevealState::Hidden,
            OrderDirection::Descending,
        );
        let reversed: Vec<_> =
            ascending.into_iter().rev().collect();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn test_equal_values_keep_catalogue_order() {
        // Measuring Devices and Knitwear share 1.3; the stable sort
        // must keep their relative catalogue order.
        let entries = visible_commodities(
            RevealState::Hidden,
            OrderDirection::Ascending,
        );
        let measuring = entries
            .iter()
            .position(|e| e.commodity == "Measuring Devices")
            .unwrap();
        let knitwear = entries
            .iter()
            .position(|e| e.commodity == "Knitwear")
            .unwrap();
        assert!(measuring < knitwear);
    }
}
