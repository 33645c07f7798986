//! Presentation surface: maps the declarative render tree to egui
//! widgets and egui_plot charts, and captures this pass's user
//! interactions as actions for the app queue. Nothing in here mutates
//! the store directly.

use crate::actions::Action;
use crate::assets::{AssetId, Assets};
use crate::render::{
    CalloutTone, CommodityScalePanel, CycleDiagramSpec, CyclePanel,
    EvidencePanel, GrowthChartSpec, IncidentAnalysisPanel,
    IncidentChartSpec, MarketPanel, Panel, Perspective, RenderTree,
    StationMapPanel, TitlePanel,
};
use eframe::egui::{self, Align2, Color32, RichText};
use egui_plot::{
    Arrows, Bar, BarChart, Corner, GridMark, Legend, Line,
    MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text,
};

const PHOTO_WIDTH: f32 = 360.0;
const MAP_WIDTH: f32 = 480.0;

/// Render the whole document and return the interactions captured
/// this pass.
pub fn show(
    ctx: &egui::Context,
    tree: &RenderTree,
    assets: &Assets,
) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for panel in &tree.panels {
                    match panel {
                        Panel::Title(p) => title_panel(ui, p),
                        Panel::StationMap(p) => station_panel(
                            ui,
                            p,
                            assets,
                            &mut actions,
                        ),
                        Panel::Market(p) => {
                            market_panel(ui, p, assets)
                        }
                        Panel::Evidence(p) => {
                            evidence_panel(ui, p, assets)
                        }
                        Panel::CommodityScale(p) => {
                            commodity_panel(ui, p, &mut actions)
                        }
                        Panel::IncidentAnalysis(p) => {
                            incident_panel(ui, p)
                        }
                        Panel::ViciousCycle(p) => {
                            cycle_panel(ui, p, &mut actions)
                        }
                    }
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                }
            });
    });

    actions
}

// ------------------------------------------------------------------
// Shared widgets
// ------------------------------------------------------------------

fn photo(
    ui: &mut egui::Ui,
    assets: &Assets,
    id: AssetId,
    width: f32,
    caption: &str,
) {
    // A missing asset was already logged at load time; the panel
    // simply continues without its visual.
    if let Some(texture) = assets.texture(id) {
        ui.add(egui::Image::new(texture).max_width(width));
        if !caption.is_empty() {
            ui.label(RichText::new(caption).small().weak());
        }
    }
}

fn metric(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    delta: &str,
) {
    ui.label(RichText::new(label).small().weak());
    ui.label(RichText::new(value).size(26.0).strong());
    ui.label(
        RichText::new(delta)
            .small()
            .color(Color32::LIGHT_GREEN),
    );
}

fn callout(
    ui: &mut egui::Ui,
    tone: CalloutTone,
    title: Option<&str>,
    body: &str,
) {
    let fill = match tone {
        CalloutTone::Info => {
            Color32::from_rgba_unmultiplied(70, 130, 180, 40)
        }
        CalloutTone::Success => {
            Color32::from_rgba_unmultiplied(0, 140, 60, 40)
        }
        CalloutTone::Warning => {
            Color32::from_rgba_unmultiplied(200, 160, 0, 40)
        }
        CalloutTone::Error => {
            Color32::from_rgba_unmultiplied(190, 40, 40, 40)
        }
    };

    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            if let Some(title) = title {
                ui.label(RichText::new(title).strong());
            }
            ui.label(body);
        });
}

/// Map a grid mark back to its axis label; marks between the integer
/// positions stay unlabeled.
fn index_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

// ------------------------------------------------------------------
// Panels
// ------------------------------------------------------------------

fn title_panel(ui: &mut egui::Ui, panel: &TitlePanel) {
    ui.heading(RichText::new(panel.title).size(26.0));
    ui.add_space(6.0);
    for paragraph in panel.lede {
        ui.label(*paragraph);
        ui.add_space(4.0);
    }
}

fn station_panel(
    ui: &mut egui::Ui,
    panel: &StationMapPanel,
    assets: &Assets,
    actions: &mut Vec<Action>,
) {
    ui.heading(panel.heading);
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        let left = &mut columns[0];
        photo(left, assets, panel.map, MAP_WIDTH, panel.map_caption);
        left.label(RichText::new(panel.prompt).small());
        left.horizontal_wrapped(|ui| {
            for station in panel.options {
                let checked = station == panel.selected;
                if ui.radio(checked, station.label()).clicked()
                    && !checked
                {
                    actions
                        .push(Action::SelectStation { station });
                }
            }
        });

        let right = &mut columns[1];
        right.label(
            RichText::new(panel.detail.name).size(18.0).strong(),
        );
        photo(right, assets, panel.detail.photo, PHOTO_WIDTH, "");
        metric(
            right,
            panel.detail.metric.label,
            panel.detail.metric.value,
            panel.detail.metric.delta,
        );
        if let Some(chart) = &panel.growth_chart {
            growth_chart(right, chart);
        }
        callout(right, CalloutTone::Info, None, panel.detail.blurb);
    });
}

fn growth_chart(ui: &mut egui::Ui, spec: &GrowthChartSpec) {
    ui.label(RichText::new(spec.title).strong());

    let series = spec.points.clone();
    Plot::new("station_growth")
        .height(220.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(
            |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
                let year = mark.value.round();
                if (mark.value - year).abs() < 0.05 {
                    format!("{year:.0}")
                } else {
                    String::new()
                }
            },
        )
        .y_axis_label("Passengers (Millions)")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(
                    "passengers",
                    PlotPoints::from(series.clone()),
                )
                .color(spec.color)
                .width(2.0)
                .fill(0.0),
            );
            plot_ui.points(
                Points::new(
                    "passengers-markers",
                    PlotPoints::from(series),
                )
                .radius(4.0)
                .filled(true)
                .color(spec.color),
            );
        });
}

fn market_panel(
    ui: &mut egui::Ui,
    panel: &MarketPanel,
    assets: &Assets,
) {
    ui.heading(panel.heading);
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        photo(
            &mut columns[0],
            assets,
            panel.photo,
            PHOTO_WIDTH,
            panel.caption,
        );

        let right = &mut columns[1];
        right.label(
            RichText::new(panel.subheading).size(16.0).strong(),
        );
        metric(
            right,
            panel.metric_label,
            panel.metric_value,
            panel.metric_delta,
        );
        right.label(panel.body);
    });
}

fn evidence_panel(
    ui: &mut egui::Ui,
    panel: &EvidencePanel,
    assets: &Assets,
) {
    ui.heading(panel.heading);
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        for (column, ui) in
            panel.columns.iter().zip(columns.iter_mut())
        {
            ui.label(
                RichText::new(column.heading).size(16.0).strong(),
            );
            photo(
                ui,
                assets,
                column.photo,
                PHOTO_WIDTH,
                column.caption,
            );
            callout(
                ui,
                column.tone,
                Some(column.callout_title),
                column.callout_body,
            );
        }
    });
}

fn commodity_panel(
    ui: &mut egui::Ui,
    panel: &CommodityScalePanel,
    actions: &mut Vec<Action>,
) {
    ui.heading(panel.heading);
    ui.add_space(6.0);
    ui.label(RichText::new(panel.title).strong());

    let bars: Vec<Bar> = panel
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            Bar::new(i as f64, bar.value)
                .name(bar.label)
                .fill(bar.color)
                .width(0.6)
        })
        .collect();
    let labels: Vec<String> = panel
        .bars
        .iter()
        .map(|bar| bar.label.to_string())
        .collect();
    let values: Vec<f64> =
        panel.bars.iter().map(|bar| bar.value).collect();

    Plot::new("commodity_scale")
        .height(380.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .include_x(0.0)
        .include_x(11.0)
        .y_axis_formatter(
            move |mark: GridMark,
                  _range: &std::ops::RangeInclusive<f64>| {
                index_label(&labels, mark.value)
            },
        )
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new("commodities", bars).horizontal(),
            );
            for (i, value) in values.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        format!("commodity-value-{i}"),
                        PlotPoint::new(value + 0.2, i as f64),
                        RichText::new(format!("£{value}B"))
                            .size(10.0),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        });

    if ui.button(panel.button_label).clicked() {
        actions.push(Action::ToggleReveal {
            action: panel.button_action,
        });
    }
}

fn incident_panel(
    ui: &mut egui::Ui,
    panel: &IncidentAnalysisPanel,
) {
    match panel {
        IncidentAnalysisPanel::NoData { heading, notice } => {
            ui.heading(*heading);
            ui.add_space(6.0);
            callout(ui, CalloutTone::Warning, None, notice);
        }
        IncidentAnalysisPanel::Chart {
            heading,
            spec,
            footer,
        } => {
            ui.heading(*heading);
            ui.add_space(6.0);
            incident_chart(ui, spec);
            ui.add_space(4.0);
            ui.label(*footer);
        }
    }
}

fn incident_chart(ui: &mut egui::Ui, spec: &IncidentChartSpec) {
    ui.label(RichText::new(&spec.title).strong());

    // One chart per category, each stacked on all the ones before it.
    let mut charts: Vec<BarChart> = Vec::new();
    for series in &spec.series {
        let bars: Vec<Bar> = series
            .values
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value > 0)
            .map(|(li, &value)| {
                Bar::new(li as f64, value as f64)
                    .name(&series.name)
                    .fill(series.color)
                    .width(0.7)
            })
            .collect();

        let mut chart = BarChart::new(series.name.clone(), bars)
            .color(series.color)
            .horizontal();
        {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    let labels = spec.locations.clone();
    Plot::new("incident_analysis")
        .height(640.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default().position(Corner::RightTop))
        .include_x(0.0)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .y_axis_formatter(
            move |mark: GridMark,
                  _range: &std::ops::RangeInclusive<f64>| {
                index_label(&labels, mark.value)
            },
        )
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn cycle_panel(
    ui: &mut egui::Ui,
    panel: &CyclePanel,
    actions: &mut Vec<Action>,
) {
    ui.heading(panel.heading);
    ui.add_space(6.0);
    ui.label(panel.prompt);
    ui.horizontal_wrapped(|ui| {
        for &selection in &panel.options {
            let checked = selection == panel.selected;
            if ui.radio(checked, selection.label()).clicked()
                && !checked
            {
                actions
                    .push(Action::SelectCycleStage { selection });
            }
        }
    });
    ui.add_space(6.0);

    ui.columns(2, |columns| {
        cycle_diagram(&mut columns[0], &panel.diagram);

        let right = &mut columns[1];
        right.label(
            RichText::new(panel.detail.heading)
                .size(18.0)
                .strong(),
        );
        callout(right, panel.detail.tone, None, panel.detail.body);
        if let Some(extra) = panel.detail.extra {
            callout(right, CalloutTone::Error, None, extra);
        }
        right.add_space(8.0);
        right.separator();
        perspectives(right, &panel.perspectives);
    });
}

fn cycle_diagram(ui: &mut egui::Ui, spec: &CycleDiagramSpec) {
    let origins: Vec<[f64; 2]> = spec
        .arrows
        .iter()
        .map(|a| [a.from.0, a.from.1])
        .collect();
    let tips: Vec<[f64; 2]> = spec
        .arrows
        .iter()
        .map(|a| [a.to.0, a.to.1])
        .collect();

    Plot::new("cycle_diagram")
        .height(480.0)
        .data_aspect(1.0)
        .include_x(-1.8)
        .include_x(1.8)
        .include_y(-1.8)
        .include_y(1.8)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.arrows(
                Arrows::new(
                    "cycle-flow",
                    PlotPoints::from(origins.clone()),
                    PlotPoints::from(tips.clone()),
                )
                .color(spec.arrow_color)
                .tip_length(12.0),
            );

            plot_ui.points(
                Points::new(
                    "cycle-center",
                    PlotPoints::from(vec![[0.0, 0.0]]),
                )
                .shape(MarkerShape::Diamond)
                .radius(46.0)
                .filled(true)
                .color(spec.center_fill),
            );
            plot_ui.text(
                Text::new(
                    "cycle-center-label",
                    PlotPoint::new(0.0, 0.0),
                    RichText::new(spec.center_text)
                        .size(10.0)
                        .color(Color32::BLACK),
                )
                .anchor(Align2::CENTER_CENTER),
            );

            for node in &spec.nodes {
                // Border ring first, fill disc on top; the size gap
                // is the stroke width from the emphasis derivation.
                plot_ui.points(
                    Points::new(
                        format!("cycle-node-border-{}", node.id),
                        PlotPoints::from(vec![[node.x, node.y]]),
                    )
                    .shape(MarkerShape::Circle)
                    .radius(
                        node.emphasis.marker_radius
                            + node.emphasis.stroke_width,
                    )
                    .filled(true)
                    .color(node.border),
                );
                plot_ui.points(
                    Points::new(
                        format!("cycle-node-{}", node.id),
                        PlotPoints::from(vec![[node.x, node.y]]),
                    )
                    .shape(MarkerShape::Circle)
                    .radius(node.emphasis.marker_radius)
                    .filled(true)
                    .color(node.fill),
                );
                plot_ui.text(
                    Text::new(
                        format!("cycle-node-label-{}", node.id),
                        PlotPoint::new(node.x, node.y + 0.42),
                        RichText::new(node.label)
                            .size(11.0)
                            .strong(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

fn perspectives(ui: &mut egui::Ui, tabs: &[Perspective; 3]) {
    // Which tab is open is pure chrome, so it lives in egui's
    // temporary widget memory rather than the session store.
    let tab_id = ui.make_persistent_id("perspective_tab");
    let mut active = ui
        .ctx()
        .data_mut(|d| *d.get_temp_mut_or_default::<usize>(tab_id));

    ui.horizontal(|ui| {
        for (i, tab) in tabs.iter().enumerate() {
            if ui.selectable_label(active == i, tab.title).clicked()
            {
                active = i;
            }
        }
    });
    ui.ctx().data_mut(|d| d.insert_temp(tab_id, active));

    let active = active.min(tabs.len() - 1);
    ui.label(tabs[active].body);
}
