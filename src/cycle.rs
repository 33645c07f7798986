//! The five-stage market cycle: stage enumeration, circular placement
//! of the stage nodes, the closed ring of arrows between them, and the
//! per-node emphasis derived from the current stage selection.

use petgraph::Directed;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

// Fixed diagram geometry. The layout is deterministic: re-invoking with
// the same inputs yields bit-identical positions.
pub const CYCLE_RADIUS: f64 = 1.2;
pub const START_ANGLE_DEG: f64 = 90.0;
/// How far arrow endpoints are pulled inward along the edge so the
/// arrowheads clear the node markers, in plot coordinates.
pub const ARROW_STANDOFF: f64 = 0.3;

// Marker emphasis, in screen points.
const ACTIVE_MARKER_RADIUS: f32 = 32.0;
const INACTIVE_MARKER_RADIUS: f32 = 22.0;
const ACTIVE_STROKE_WIDTH: f32 = 3.0;
const INACTIVE_STROKE_WIDTH: f32 = 1.0;

// ------------------------------------------------------------------
// Stages
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleStage {
    Provider,
    Distributor,
    Market,
    Buyers,
    Reinvestment,
}

pub const ALL_STAGES: [CycleStage; 5] = [
    CycleStage::Provider,
    CycleStage::Distributor,
    CycleStage::Market,
    CycleStage::Buyers,
    CycleStage::Reinvestment,
];

impl CycleStage {
    pub fn id(self) -> u8 {
        match self {
            CycleStage::Provider => 1,
            CycleStage::Distributor => 2,
            CycleStage::Market => 3,
            CycleStage::Buyers => 4,
            CycleStage::Reinvestment => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CycleStage::Provider => "1. Drug provider",
            CycleStage::Distributor => "2. Drug distributor",
            CycleStage::Market => "3. Market",
            CycleStage::Buyers => "4. Drug buyers",
            CycleStage::Reinvestment => "5. Market reinvestment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CycleStage::Provider => {
                "The source of illicit substances."
            }
            CycleStage::Distributor => {
                "Key distributors in the network."
            }
            CycleStage::Market => "The central hub for exchange.",
            CycleStage::Buyers => "The demand side of the market.",
            CycleStage::Reinvestment => {
                "Expansion and reinforcement of the trade."
            }
        }
    }
}

/// Either a single highlighted stage or the whole ring at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleSelection {
    Stage(CycleStage),
    #[default]
    FullCycle,
}

impl CycleSelection {
    pub fn label(self) -> &'static str {
        match self {
            CycleSelection::Stage(stage) => stage.label(),
            CycleSelection::FullCycle => "See Full Cycle",
        }
    }
}

/// A node is active when it is the selected stage, or when the whole
/// cycle is shown.
pub fn is_active(
    stage: CycleStage,
    selection: CycleSelection,
) -> bool {
    match selection {
        CycleSelection::Stage(selected) => selected == stage,
        CycleSelection::FullCycle => true,
    }
}

// ------------------------------------------------------------------
// Layout
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CycleNode {
    pub stage: CycleStage,
    pub x: f64,
    pub y: f64,
}

/// Place `count` nodes evenly on a circle of `radius` around the
/// origin, starting at `start_angle_deg` and travelling clockwise
/// (the subtraction encodes the travel direction).
pub fn circle_positions(
    count: usize,
    radius: f64,
    start_angle_deg: f64,
) -> Vec<(f64, f64)> {
    let sector = 360.0 / count as f64;
    (0..count)
        .map(|i| {
            let angle =
                (start_angle_deg - i as f64 * sector).to_radians();
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

pub type CycleGraph = StableGraph<CycleNode, (), Directed>;

/// Build the stage ring: one node per stage on the circle, one directed
/// edge from each stage to its successor, closing back on the first.
pub fn build_cycle_graph(radius: f64) -> CycleGraph {
    let positions =
        circle_positions(ALL_STAGES.len(), radius, START_ANGLE_DEG);

    let mut graph = CycleGraph::default();
    let indices: Vec<_> = ALL_STAGES
        .iter()
        .zip(&positions)
        .map(|(&stage, &(x, y))| {
            graph.add_node(CycleNode { stage, x, y })
        })
        .collect();

    for i in 0..indices.len() {
        let next = (i + 1) % indices.len();
        graph.add_edge(indices[i], indices[next], ());
    }

    graph
}

/// A directed arrow between two ring nodes, already shortened by the
/// stand-off at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingArrow {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Derive the arrows of the closed ring from the cycle graph, pulling
/// each endpoint inward by `standoff` along the edge direction.
pub fn ring_arrows(
    graph: &CycleGraph,
    standoff: f64,
) -> Vec<RingArrow> {
    graph
        .edge_references()
        .map(|edge| {
            let a = &graph[edge.source()];
            let b = &graph[edge.target()];
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len = (dx * dx + dy * dy).sqrt();
            let (ux, uy) = (dx / len, dy / len);
            RingArrow {
                from: (a.x + ux * standoff, a.y + uy * standoff),
                to: (b.x - ux * standoff, b.y - uy * standoff),
            }
        })
        .collect()
}

// ------------------------------------------------------------------
// Emphasis
// ------------------------------------------------------------------

/// Visual weight of one ring node under the current selection.
/// Recomputed every pass; never cached across state changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeEmphasis {
    pub active: bool,
    pub marker_radius: f32,
    pub stroke_width: f32,
}

pub fn emphasis(
    stage: CycleStage,
    selection: CycleSelection,
) -> NodeEmphasis {
    if is_active(stage, selection) {
        NodeEmphasis {
            active: true,
            marker_radius: ACTIVE_MARKER_RADIUS,
            stroke_width: ACTIVE_STROKE_WIDTH,
        }
    } else {
        NodeEmphasis {
            active: false,
            marker_radius: INACTIVE_MARKER_RADIUS,
            stroke_width: INACTIVE_STROKE_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_positions_equidistant_from_center() {
        let positions = circle_positions(5, 1.2, START_ANGLE_DEG);
        assert_eq!(positions.len(), 5);
        for &(x, y) in &positions {
            let distance = (x * x + y * y).sqrt();
            assert!(
                (distance - 1.2).abs() < TOLERANCE,
                "node at ({x}, {y}) is {distance} from center"
            );
        }
    }

    #[test]
    fn test_consecutive_gaps_are_72_degrees() {
        let positions = circle_positions(5, 1.2, START_ANGLE_DEG);
        for i in 0..positions.len() {
            let (ax, ay) = positions[i];
            let (bx, by) = positions[(i + 1) % positions.len()];
            let gap = (ay.atan2(ax) - by.atan2(bx))
                .to_degrees()
                .rem_euclid(360.0);
            assert!(
                (gap - 72.0).abs() < TOLERANCE,
                "gap between node {i} and its successor is {gap}"
            );
        }
    }

    #[test]
    fn test_first_node_sits_at_the_top() {
        let positions = circle_positions(5, 1.2, 90.0);
        let (x, y) = positions[0];
        assert!(x.abs() < TOLERANCE);
        assert!((y - 1.2).abs() < TOLERANCE);
    }

    #[test]
    fn test_layout_is_bit_identical_across_invocations() {
        let first = circle_positions(5, 1.2, START_ANGLE_DEG);
        let second = circle_positions(5, 1.2, START_ANGLE_DEG);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.0.to_bits(), b.0.to_bits());
            assert_eq!(a.1.to_bits(), b.1.to_bits());
        }
    }

    #[test]
    fn test_ring_is_closed_and_ordered() {
        let graph = build_cycle_graph(CYCLE_RADIUS);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);

        let arrows = ring_arrows(&graph, 0.0);
        assert_eq!(arrows.len(), 5);
        // With zero stand-off every arrow starts exactly where the
        // previous one ended, closing the ring.
        for i in 0..arrows.len() {
            let next = &arrows[(i + 1) % arrows.len()];
            assert!(
                (arrows[i].to.0 - next.from.0).abs() < TOLERANCE
            );
            assert!(
                (arrows[i].to.1 - next.from.1).abs() < TOLERANCE
            );
        }
    }

    #[test]
    fn test_standoff_shortens_arrows_at_both_ends() {
        let graph = build_cycle_graph(CYCLE_RADIUS);
        let full = ring_arrows(&graph, 0.0);
        let trimmed = ring_arrows(&graph, ARROW_STANDOFF);

        for (f, t) in full.iter().zip(&trimmed) {
            let full_len = ((f.to.0 - f.from.0).powi(2)
                + (f.to.1 - f.from.1).powi(2))
            .sqrt();
            let trimmed_len = ((t.to.0 - t.from.0).powi(2)
                + (t.to.1 - t.from.1).powi(2))
            .sqrt();
            assert!(
                (full_len - trimmed_len - 2.0 * ARROW_STANDOFF).abs()
                    < TOLERANCE,
                "expected both ends trimmed by the stand-off"
            );
        }
    }

    #[test]
    fn test_single_stage_selection_activates_exactly_one_node() {
        let selection = CycleSelection::Stage(CycleStage::Market);
        let active: Vec<_> = ALL_STAGES
            .iter()
            .filter(|&&stage| is_active(stage, selection))
            .collect();
        assert_eq!(active, vec![&CycleStage::Market]);
        assert_eq!(CycleStage::Market.id(), 3);
    }

    #[test]
    fn test_full_cycle_activates_all_nodes() {
        for stage in ALL_STAGES {
            let e = emphasis(stage, CycleSelection::FullCycle);
            assert!(e.active);
            assert!(e.marker_radius > 0.0);
        }
    }

    #[test]
    fn test_emphasis_weights_active_over_inactive() {
        let active = emphasis(
            CycleStage::Buyers,
            CycleSelection::Stage(CycleStage::Buyers),
        );
        let inactive = emphasis(
            CycleStage::Provider,
            CycleSelection::Stage(CycleStage::Buyers),
        );
        assert!(active.marker_radius > inactive.marker_radius);
        assert!(active.stroke_width > inactive.stroke_width);
    }
}
