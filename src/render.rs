//! The render pass orchestrator: one pure function from the current
//! store to a declarative render tree. Invoked unconditionally on
//! every pass; there is no incremental recomputation and no caching of
//! derived views across state changes.

use crate::assets::AssetId;
use crate::commodities::{self, CommodityKind};
use crate::config::PresentationConfig;
use crate::cycle::{
    self, ALL_STAGES, ARROW_STANDOFF, CYCLE_RADIUS, CycleSelection,
    CycleStage, NodeEmphasis, RingArrow,
};
use crate::derived::{self, TOP_LOCATION_COUNT};
use crate::incidents::{DataLoadError, IncidentRecord};
use crate::reveal::{RevealState, ToggleAction};
use crate::stations::{ALL_STATIONS, Station, StationDetail};
use crate::store::Store;
use crate::theme;
use eframe::egui::Color32;

// ------------------------------------------------------------------
// Document phase
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPresence {
    HasData,
    NoData,
}

/// Lifecycle of the whole document. `Loading` covers the synchronous
/// startup fetch; `Failed` halts the session before any pass runs;
/// within `Ready` the presence split decides between the incident
/// chart and the no-data notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPhase {
    Loading,
    Ready(DataPresence),
    Failed,
}

impl DocumentPhase {
    /// Resolve the startup fetch result.
    pub fn from_load(
        result: &Result<Vec<IncidentRecord>, DataLoadError>,
    ) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => {
                DocumentPhase::Ready(DataPresence::NoData)
            }
            Ok(_) => DocumentPhase::Ready(DataPresence::HasData),
            Err(_) => DocumentPhase::Failed,
        }
    }
}

// ------------------------------------------------------------------
// Render tree
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutTone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitlePanel {
    pub title: &'static str,
    pub lede: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthChartSpec {
    pub title: &'static str,
    /// `[year, passengers in millions]` points.
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMapPanel {
    pub heading: &'static str,
    pub map: AssetId,
    pub map_caption: &'static str,
    pub prompt: &'static str,
    pub options: [Station; 3],
    pub selected: Station,
    pub detail: StationDetail,
    pub growth_chart: Option<GrowthChartSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketPanel {
    pub heading: &'static str,
    pub photo: AssetId,
    pub caption: &'static str,
    pub subheading: &'static str,
    pub metric_label: &'static str,
    pub metric_value: &'static str,
    pub metric_delta: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceColumn {
    pub heading: &'static str,
    pub photo: AssetId,
    pub caption: &'static str,
    pub tone: CalloutTone,
    pub callout_title: &'static str,
    pub callout_body: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvidencePanel {
    pub heading: &'static str,
    pub columns: [EvidenceColumn; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityBar {
    pub label: &'static str,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityScalePanel {
    pub heading: &'static str,
    pub title: &'static str,
    /// Already in axis order; index 0 renders at the bottom.
    pub bars: Vec<CommodityBar>,
    /// The one transition currently offered to the user.
    pub button_action: ToggleAction,
    pub button_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub name: String,
    pub color: Color32,
    /// Aligned to the location axis.
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub locations: Vec<String>,
    pub series: Vec<CategorySeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncidentAnalysisPanel {
    Chart {
        heading: &'static str,
        spec: IncidentChartSpec,
        footer: &'static str,
    },
    NoData {
        heading: &'static str,
        notice: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleNodeSpec {
    pub id: u8,
    pub label: &'static str,
    pub x: f64,
    pub y: f64,
    pub emphasis: NodeEmphasis,
    pub fill: Color32,
    pub border: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleDiagramSpec {
    pub nodes: Vec<CycleNodeSpec>,
    pub arrows: Vec<RingArrow>,
    pub arrow_color: Color32,
    pub center_text: &'static str,
    pub center_fill: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Perspective {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleDetail {
    pub heading: &'static str,
    pub tone: CalloutTone,
    pub body: &'static str,
    /// The buyers stage carries an extra community-impact warning.
    pub extra: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CyclePanel {
    pub heading: &'static str,
    pub prompt: &'static str,
    pub options: Vec<CycleSelection>,
    pub selected: CycleSelection,
    pub diagram: CycleDiagramSpec,
    pub detail: CycleDetail,
    pub perspectives: [Perspective; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Title(TitlePanel),
    StationMap(StationMapPanel),
    Market(MarketPanel),
    Evidence(EvidencePanel),
    CommodityScale(CommodityScalePanel),
    IncidentAnalysis(IncidentAnalysisPanel),
    ViciousCycle(CyclePanel),
}

/// The whole document for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub phase: DocumentPhase,
    pub panels: Vec<Panel>,
}

// ------------------------------------------------------------------
// Narrative text
// ------------------------------------------------------------------

const TITLE: &str = "Camden Borough Protection Strategy: Short-, \
                     Medium-, and Long-Term Planning Framework";

const LEDE: [&str; 3] = [
    "Camden has the opportunity to set a strong example in London. \
     Police records show the borough ranks among the top London \
     boroughs for drug dealing, and despite more officers on the \
     streets this year it remains at the top of the list, which \
     suggests a lack of strategic planning behind those measures.",
    "This briefing develops a comprehensive approach, divided into \
     one-year, three-year and five-year plans, to tackle the issue \
     in Camden and share the learning with other boroughs.",
    "A key reason Camden faces this challenge is its proximity to \
     major transport hubs: St Pancras International and King's \
     Cross. Visitors from across the UK and Europe can travel in, \
     conduct business, and return home the same day. The map and \
     station details below give the context.",
];

const NO_DATA_NOTICE: &str = "No data available for analysis.";

const INCIDENT_FOOTER: &str =
    "Escalating drug-related costs for the council and rising crime \
     rates have become a serious concern. Reports show a significant \
     increase in resident complaints about anti-social behaviour \
     across Camden.";

const BUYERS_WARNING: &str =
    "Individuals seeking drugs often congregate around this market, \
     settling as rough sleepers, beggars, or street vendors, \
     contributing to challenges for the borough.";

const FULL_CYCLE_SUMMARY: &str =
    "The cycle connects providers, distributors, the market, and \
     buyers, leading to increased costs for the council and crime.";

const CENTER_TEXT: &str = "Cost for\ncouncil &\nincreased\ncrime";

const PERSPECTIVES: [Perspective; 3] = [
    Perspective {
        title: "Neutral & Descriptive",
        body: "The best market is a lively open-air space, easily \
               reached by public transport, where beggars and rough \
               sleepers linger, and teenagers assist the dealers.",
    },
    Perspective {
        title: "Gritty & Urban",
        body: "The best market pulses with life: open to the \
               streets, packed with people, accessible by bus or \
               train, where beggars drift, rough sleepers rest, and \
               teenagers hustle alongside the dealers.",
    },
    Perspective {
        title: "Narrative",
        body: "The finest market breathes chaos and charm, open to \
               the sky and thrumming with footsteps, where the \
               city's forgotten mingle with the bold and youth \
               shadow the traders in a dance of survival.",
    },
];

// ------------------------------------------------------------------
// Orchestrator
// ------------------------------------------------------------------

/// Build the full document from the current state. Pure: calling this
/// any number of times with the same store and configuration yields
/// equal trees and leaves no state behind.
pub fn render(
    store: &Store,
    config: &PresentationConfig,
) -> RenderTree {
    let incident_panel = incident_panel(store, config);
    let phase = match &incident_panel {
        IncidentAnalysisPanel::Chart { .. } => {
            DocumentPhase::Ready(DataPresence::HasData)
        }
        IncidentAnalysisPanel::NoData { .. } => {
            DocumentPhase::Ready(DataPresence::NoData)
        }
    };

    let panels = vec![
        Panel::Title(TitlePanel {
            title: TITLE,
            lede: &LEDE,
        }),
        Panel::StationMap(station_panel(store, config)),
        Panel::Market(market_panel()),
        Panel::Evidence(evidence_panel()),
        Panel::CommodityScale(commodity_panel(store, config)),
        Panel::IncidentAnalysis(incident_panel),
        Panel::ViciousCycle(cycle_panel(store, config)),
    ];

    RenderTree { phase, panels }
}

fn station_panel(
    store: &Store,
    config: &PresentationConfig,
) -> StationMapPanel {
    let selected = store.session.station();
    let detail = selected.detail();
    let growth_chart = detail.growth.map(|points| GrowthChartSpec {
        title: "Explosive Passenger Growth",
        points: points
            .iter()
            .map(|p| [f64::from(p.year), p.passengers])
            .collect(),
        color: config.palette.growth,
    });

    StationMapPanel {
        heading: "The Critical Transport Triangle",
        map: AssetId::HubMap,
        map_caption: "Map of Key Transport Hubs",
        prompt: "Select a station to view passenger statistics and \
                 details.",
        options: ALL_STATIONS,
        selected,
        detail,
        growth_chart,
    }
}

fn market_panel() -> MarketPanel {
    MarketPanel {
        heading: "Inverness Street Market",
        photo: AssetId::MarketPhoto,
        caption: "Inverness Street Market",
        subheading: "The Commerce-Crime Nexus",
        metric_label: "Yearly Visitors",
        metric_value: "14,000,000",
        metric_delta: "High Density Area",
        body: "For the postcode around Inverness Street (NW1 7HB) \
               the estimated annual drug-crime rate is 139 per \
               1,000 (very high). Market traders, restaurants and \
               cafés have publicly complained that open drug \
               dealing is persistent and part of a nuisance \
               problem.",
    }
}

fn evidence_panel() -> EvidencePanel {
    EvidencePanel {
        heading: "The Evidence Challenge",
        columns: [
            EvidenceColumn {
                heading: "1. The Requirement",
                photo: AssetId::ExchangePhoto,
                caption: "Hand-to-Hand Exchange",
                tone: CalloutTone::Success,
                callout_title: "Actionable Evidence",
                callout_body: "Police require clear footage of a \
                               hand-to-hand exchange of money for \
                               drugs.",
            },
            EvidenceColumn {
                heading: "2. The Problem",
                photo: AssetId::BinFindPhoto,
                caption: "Drugs Found in Bin",
                tone: CalloutTone::Error,
                callout_title: "Insufficient Evidence",
                callout_body: "Finding drugs in bins or on the \
                               ground is not enough without linking \
                               possession to a suspect.",
            },
        ],
    }
}

fn commodity_panel(
    store: &Store,
    config: &PresentationConfig,
) -> CommodityScalePanel {
    let reveal = store.session.reveal();
    let bars = commodities::visible_commodities(reveal, config.order)
        .into_iter()
        .map(|entry| CommodityBar {
            label: entry.commodity,
            value: entry.value,
            color: match entry.kind {
                CommodityKind::Legal => config.palette.legal,
                CommodityKind::Illegal => config.palette.illegal,
            },
        })
        .collect();

    let (button_action, button_label) = match reveal {
        RevealState::Hidden => (
            ToggleAction::Reveal,
            "Reveal Illicit Market Scale",
        ),
        RevealState::Revealed => {
            (ToggleAction::Reset, "Reset Chart")
        }
    };

    CommodityScalePanel {
        heading: "Economic Scale: Legal Imports vs. Illicit Market",
        title: "Top UK Commodities vs. Illicit Drugs Market \
                (£ Billions)",
        bars,
        button_action,
        button_label,
    }
}

fn incident_panel(
    store: &Store,
    config: &PresentationConfig,
) -> IncidentAnalysisPanel {
    let heading =
        "Incidents by Location and Type (Top 20 Locations)";

    let Some(view) = derived::incident_view(
        &store.incidents,
        TOP_LOCATION_COUNT,
        config.order,
    ) else {
        return IncidentAnalysisPanel::NoData {
            heading,
            notice: NO_DATA_NOTICE,
        };
    };

    let series = view
        .categories
        .iter()
        .zip(&view.counts)
        .enumerate()
        .map(|(i, (name, values))| CategorySeries {
            name: name.clone(),
            color: theme::category_color(name, i),
            values: values.clone(),
        })
        .collect();

    IncidentAnalysisPanel::Chart {
        heading,
        spec: IncidentChartSpec {
            title: format!(
                "Total Incidents in Dataset: {}",
                view.grand_total
            ),
            x_label: "Number of Incidents",
            y_label: "Location",
            locations: view.locations,
            series,
        },
        footer: INCIDENT_FOOTER,
    }
}

fn cycle_panel(
    store: &Store,
    config: &PresentationConfig,
) -> CyclePanel {
    let selected = store.session.cycle_stage();
    let palette = &config.palette;

    let graph = cycle::build_cycle_graph(CYCLE_RADIUS);
    let arrows = cycle::ring_arrows(&graph, ARROW_STANDOFF);

    let nodes = graph
        .node_weights()
        .map(|node| {
            let emphasis = cycle::emphasis(node.stage, selected);
            CycleNodeSpec {
                id: node.stage.id(),
                label: node.stage.label(),
                x: node.x,
                y: node.y,
                emphasis,
                fill: if emphasis.active {
                    palette.active_node
                } else {
                    palette.inactive_node
                },
                border: if emphasis.active {
                    palette.active_border
                } else {
                    palette.inactive_border
                },
            }
        })
        .collect();

    let mut options: Vec<CycleSelection> = ALL_STAGES
        .iter()
        .map(|&stage| CycleSelection::Stage(stage))
        .collect();
    options.push(CycleSelection::FullCycle);

    let detail = match selected {
        CycleSelection::Stage(stage) => CycleDetail {
            heading: stage.label(),
            tone: CalloutTone::Info,
            body: stage.description(),
            extra: (stage == CycleStage::Buyers)
                .then_some(BUYERS_WARNING),
        },
        CycleSelection::FullCycle => CycleDetail {
            heading: "Cycle Overview",
            tone: CalloutTone::Warning,
            body: FULL_CYCLE_SUMMARY,
            extra: None,
        },
    };

    CyclePanel {
        heading:
            "The Vicious Cycle: Supply, Demand, & Community Impact",
        prompt: "Select Cycle Stage:",
        options,
        selected,
        diagram: CycleDiagramSpec {
            nodes,
            arrows,
            arrow_color: palette.arrow,
            center_text: CENTER_TEXT,
            center_fill: palette.center_fill,
        },
        detail,
        perspectives: PERSPECTIVES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{self, Action};
    use crate::incidents::IncidentRecord;

    fn record(
        location: &str,
        category: &str,
        count: u64,
    ) -> IncidentRecord {
        IncidentRecord {
            location: location.to_string(),
            category: category.to_string(),
            count,
        }
    }

    fn sample_store() -> Store {
        Store::new(vec![
            record("X", "Noise", 5),
            record("X", "Youths", 3),
            record("Y", "Noise", 10),
        ])
    }

    fn find_commodity_panel(
        tree: &RenderTree,
    ) -> &CommodityScalePanel {
        tree.panels
            .iter()
            .find_map(|p| match p {
                Panel::CommodityScale(panel) => Some(panel),
                _ => None,
            })
            .expect("commodity panel must always be present")
    }

    fn find_cycle_panel(tree: &RenderTree) -> &CyclePanel {
        tree.panels
            .iter()
            .find_map(|p| match p {
                Panel::ViciousCycle(panel) => Some(panel),
                _ => None,
            })
            .expect("cycle panel must always be present")
    }

    #[test]
    fn test_render_is_idempotent() {
        let store = sample_store();
        let config = PresentationConfig::default();
        assert_eq!(
            render(&store, &config),
            render(&store, &config)
        );
    }

    #[test]
    fn test_empty_table_renders_no_data_notice() {
        let store = Store::new(Vec::new());
        let tree = render(&store, &PresentationConfig::default());

        assert_eq!(
            tree.phase,
            DocumentPhase::Ready(DataPresence::NoData)
        );
        assert!(tree.panels.iter().any(|p| matches!(
            p,
            Panel::IncidentAnalysis(
                IncidentAnalysisPanel::NoData { .. }
            )
        )));
    }

    #[test]
    fn test_phase_resolution_from_load_result() {
        let ok: Result<Vec<IncidentRecord>, DataLoadError> =
            Ok(vec![record("X", "Noise", 1)]);
        assert_eq!(
            DocumentPhase::from_load(&ok),
            DocumentPhase::Ready(DataPresence::HasData)
        );

        let empty: Result<Vec<IncidentRecord>, DataLoadError> =
            Ok(Vec::new());
        assert_eq!(
            DocumentPhase::from_load(&empty),
            DocumentPhase::Ready(DataPresence::NoData)
        );

        let failed: Result<Vec<IncidentRecord>, DataLoadError> =
            Err(DataLoadError::Unreadable {
                path: "data.csv".into(),
                source: std::io::Error::other("denied"),
            });
        assert_eq!(
            DocumentPhase::from_load(&failed),
            DocumentPhase::Failed
        );
    }

    #[test]
    fn test_incident_chart_orders_largest_last() {
        let store = sample_store();
        let tree = render(&store, &PresentationConfig::default());

        let spec = tree
            .panels
            .iter()
            .find_map(|p| match p {
                Panel::IncidentAnalysis(
                    IncidentAnalysisPanel::Chart { spec, .. },
                ) => Some(spec),
                _ => None,
            })
            .expect("non-empty table must produce a chart");

        assert_eq!(
            spec.locations,
            vec!["X".to_string(), "Y".to_string()]
        );
        assert!(spec.title.contains("18"));
        assert_eq!(spec.series.len(), 2);
    }

    #[test]
    fn test_reveal_flag_drives_the_commodity_panel() {
        let mut store = sample_store();
        let config = PresentationConfig::default();

        let tree = render(&store, &config);
        let panel = find_commodity_panel(&tree);
        assert_eq!(panel.bars.len(), 10);
        assert_eq!(panel.button_action, ToggleAction::Reveal);

        actions::update(
            &mut store,
            Action::ToggleReveal {
                action: ToggleAction::Reveal,
            },
        );
        let tree = render(&store, &config);
        let panel = find_commodity_panel(&tree);
        assert_eq!(panel.bars.len(), 11);
        assert_eq!(panel.button_action, ToggleAction::Reset);
        assert_eq!(
            panel
                .bars
                .iter()
                .filter(|b| b.label == "Illicit Drugs")
                .count(),
            1
        );
    }

    #[test]
    fn test_stage_selection_drives_node_emphasis() {
        let mut store = sample_store();
        actions::update(
            &mut store,
            Action::SelectCycleStage {
                selection: CycleSelection::Stage(
                    CycleStage::Market,
                ),
            },
        );

        let tree =
            render(&store, &PresentationConfig::default());
        let panel = find_cycle_panel(&tree);

        let active: Vec<_> = panel
            .diagram
            .nodes
            .iter()
            .filter(|n| n.emphasis.active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, CycleStage::Market.label());
    }

    #[test]
    fn test_full_cycle_shows_every_node_active() {
        let store = sample_store();
        let tree =
            render(&store, &PresentationConfig::default());
        let panel = find_cycle_panel(&tree);

        assert_eq!(panel.selected, CycleSelection::FullCycle);
        assert!(
            panel
                .diagram
                .nodes
                .iter()
                .all(|n| n.emphasis.active)
        );
        assert_eq!(panel.diagram.arrows.len(), 5);
        assert_eq!(panel.options.len(), 6);
    }

    #[test]
    fn test_camden_selection_adds_the_growth_chart() {
        let mut store = sample_store();

        let tree =
            render(&store, &PresentationConfig::default());
        let station = tree
            .panels
            .iter()
            .find_map(|p| match p {
                Panel::StationMap(panel) => Some(panel),
                _ => None,
            })
            .unwrap();
        assert_eq!(station.selected, Station::StPancras);
        assert!(station.growth_chart.is_none());

        actions::update(
            &mut store,
            Action::SelectStation {
                station: Station::CamdenTown,
            },
        );
        let tree =
            render(&store, &PresentationConfig::default());
        let station = tree
            .panels
            .iter()
            .find_map(|p| match p {
                Panel::StationMap(panel) => Some(panel),
                _ => None,
            })
            .unwrap();
        let growth = station
            .growth_chart
            .as_ref()
            .expect("Camden Town carries the growth chart");
        assert_eq!(growth.points.len(), 4);
        assert_eq!(growth.points[0][0], 2020.0);
    }
}
