//! Pure aggregation pipeline behind the incident chart. Everything in
//! here is recomputed from the raw table on every render pass; nothing
//! is persisted or cached across state changes.

use crate::config::OrderDirection;
use crate::incidents::IncidentRecord;
use std::collections::HashMap;

/// The chart shows at most this many locations, selected by total.
pub const TOP_LOCATION_COUNT: usize = 20;

/// Summed incident count for one distinct location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationTotal {
    pub location: String,
    pub total: u64,
}

/// Group records by location and sum their counts. Locations keep
/// their first-appearance order so that downstream tie-breaking is
/// stable rather than arbitrary.
pub fn location_totals(
    records: &[IncidentRecord],
) -> Vec<LocationTotal> {
    let mut order: Vec<LocationTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.location.as_str()) {
            Some(&i) => order[i].total += record.count,
            None => {
                index.insert(&record.location, order.len());
                order.push(LocationTotal {
                    location: record.location.clone(),
                    total: record.count,
                });
            }
        }
    }

    order
}

/// Select the `n` largest locations by total. Totals are stable-sorted
/// ascending and the last `n` kept, so the returned slice is ascending
/// with the largest-magnitude location at the end; ties resolve to
/// input order. Fewer than `n` distinct locations returns them all.
pub fn top_locations(
    totals: &[LocationTotal],
    n: usize,
) -> Vec<String> {
    let mut sorted: Vec<&LocationTotal> = totals.iter().collect();
    sorted.sort_by_key(|t| t.total);

    let start = sorted.len().saturating_sub(n);
    sorted[start..]
        .iter()
        .map(|t| t.location.clone())
        .collect()
}

/// Chart-ready view of the incident table: the location axis, the
/// category series, and the per-cell sums the stacked bars are built
/// from. The per-category breakdown within each location is preserved;
/// only duplicate `(location, category)` rows are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentView {
    /// Axis order; with `Ascending` the largest total renders at the
    /// top end of the horizontal chart.
    pub locations: Vec<String>,
    /// Stacking order, first appearance in the filtered records.
    pub categories: Vec<String>,
    /// `counts[category][location]`, aligned to the two axes above.
    pub counts: Vec<Vec<u64>>,
    /// Sum over the whole table, shown in the chart title.
    pub grand_total: u64,
}

/// Run the full Top-N pipeline. Returns `None` on an empty table so
/// the orchestrator can surface the no-data notice instead of an
/// empty chart.
pub fn incident_view(
    records: &[IncidentRecord],
    n: usize,
    direction: OrderDirection,
) -> Option<IncidentView> {
    if records.is_empty() {
        return None;
    }

    let totals = location_totals(records);
    let mut locations = top_locations(&totals, n);
    if direction == OrderDirection::Descending {
        locations.reverse();
    }

    let location_index: HashMap<&str, usize> = locations
        .iter()
        .enumerate()
        .map(|(i, location)| (location.as_str(), i))
        .collect();

    let mut categories: Vec<String> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<Vec<u64>> = Vec::new();

    for record in records {
        let Some(&li) = location_index.get(record.location.as_str())
        else {
            // Outside the selected top-N set.
            continue;
        };
        let ci = match category_index.get(record.category.as_str()) {
            Some(&ci) => ci,
            None => {
                category_index
                    .insert(&record.category, categories.len());
                categories.push(record.category.clone());
                counts.push(vec![0; locations.len()]);
                categories.len() - 1
            }
        };
        counts[ci][li] += record.count;
    }

    let grand_total = records.iter().map(|r| r.count).sum();

    Some(IncidentView {
        locations,
        categories,
        counts,
        grand_total,
    })
}
