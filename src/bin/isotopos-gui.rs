/*!
 * Dashboard for the groundwater isotope dataset.
 *
 * - Left: sampling sites colored by P/GW. Drag a box to select sites,
 *   click empty space (or "Clear selection") to show every site again.
 * - Right: δ¹⁸O vs δ²H of the selected sites, the annual precipitation
 *   point and the global meteoric water line.
 *
 * Configuration comes from the environment only (ISOTOPOS_DATASET,
 * MAPBOX_ACCESS_TOKEN).
 */

use anyhow::{Context, Result, anyhow};
use eframe::egui::{self, Color32};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoint, Points, Polygon};
use isotopos::figure::{MarkerSymbol, SeriesMode};
use isotopos::style::{Rgb8, series_color};
use isotopos::viz::util::{AxisMapping, format_tick};
use isotopos::{ChartSpec, Config, DatasetLoader, FigureComposer, MapPanel, SelectionEvent};
use isotopos::{Selection, SelectionSource, ViewController, viz};
use std::path::PathBuf;

const BRAND: &str = "Isotopos Bogotá - Relación P/GW δ¹⁸O";
const SOURCE_REPO: &str = "https://github.com/hidabril/ISOTOPOS_BOGOTA_SUB";
/// Click distance (screen px) that still counts as hitting a site.
const SITE_PICK_PX: f64 = 6.0;

fn main() -> Result<()> {
    env_logger::init();

    // The dataset is fetched once, before the window opens; without it there
    // is nothing to show.
    let cfg = Config::from_env();
    let dataset = DatasetLoader::new()?
        .load(&cfg.dataset)
        .with_context(|| format!("loading dataset from {}", cfg.dataset))?;

    let map = MapPanel::from_dataset(&dataset, cfg.mapbox_token.as_deref());
    let composer = FigureComposer::new(dataset).with_preview(Box::new(|spec: &ChartSpec| {
        log::debug!("composed scatter with {} samples", spec.samples().len());
    }));
    let controller = ViewController::new(composer);
    let scatter = controller.displayed().clone();
    let mut selection_source = SelectionSource::new();
    controller.attach(&mut selection_source);

    let app = DashboardApp::new(map, selection_source, scatter);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([900.0, 500.0])
            .with_title(BRAND),
        ..Default::default()
    };

    eframe::run_native(BRAND, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("dashboard failed: {e}"))
}

struct DashboardApp {
    map: MapPanel,
    colors: Vec<Color32>,
    selection_source: SelectionSource,
    /// Scatter chart on display; replaced by every selection event.
    scatter: ChartSpec,
    /// Sites highlighted on the map (empty = all).
    highlighted: Vec<usize>,
    drag_start: Option<PlotPoint>,
    drag_current: Option<PlotPoint>,
    export_dir: PathBuf,
    status_message: String,
    error_message: String,
}

fn color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

impl DashboardApp {
    fn new(map: MapPanel, selection_source: SelectionSource, scatter: ChartSpec) -> Self {
        let colors = map.point_colors().into_iter().map(color32).collect();
        let export_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            map,
            colors,
            selection_source,
            scatter,
            highlighted: Vec::new(),
            drag_start: None,
            drag_current: None,
            export_dir,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    /// Forward a selection event to the subscribed controller and display
    /// whatever chart it returns.
    fn publish(&mut self, event: Option<SelectionEvent>) {
        let len = self.map.len();
        let (selection, _) = Selection::from_event(event.as_ref(), len);
        self.highlighted = selection.indices().to_vec();
        if let Some(spec) = self.selection_source.emit(event.as_ref()) {
            self.scatter = spec;
        }
        self.status_message = if self.highlighted.is_empty() {
            format!("Showing all {} samples", len)
        } else {
            format!("Showing {} of {} samples", self.highlighted.len(), len)
        };
    }

    fn map_ui(&mut self, ui: &mut egui::Ui) {
        let trace = self.map.trace();
        let highlighted = &self.highlighted;
        let colors = &self.colors;
        let rubber_band = match (self.drag_start, self.drag_current) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };

        let response = Plot::new("sampling-points-map")
            .data_aspect(1.0)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(true)
            .x_axis_label("Lon")
            .y_axis_label("Lat")
            .show(ui, |plot_ui| {
                for (i, (lon, lat)) in trace.lon.iter().zip(trace.lat.iter()).enumerate() {
                    if !lon.is_finite() || !lat.is_finite() {
                        continue;
                    }
                    let active = highlighted.is_empty() || highlighted.contains(&i);
                    let color = colors[i];
                    plot_ui.points(
                        Points::new(vec![[*lon, *lat]])
                            .shape(MarkerShape::Circle)
                            .radius(if active { 5.0 } else { 3.0 })
                            .color(if active { color } else { color.gamma_multiply(0.3) }),
                    );
                }
                if let Some((a, b)) = rubber_band {
                    plot_ui.polygon(Polygon::new(vec![
                        [a.x, a.y],
                        [b.x, a.y],
                        [b.x, b.y],
                        [a.x, b.y],
                    ]));
                }
                let r = plot_ui.response();
                let [dx, dy] = plot_ui.transform().dvalue_dpos();
                (
                    plot_ui.pointer_coordinate(),
                    (dx * SITE_PICK_PX, dy * SITE_PICK_PX),
                    r.drag_started(),
                    r.dragged(),
                    r.drag_stopped(),
                    r.clicked(),
                )
            });

        let (pointer, reach, started, dragging, stopped, clicked) = response.inner;
        if started {
            self.drag_start = pointer;
            self.drag_current = pointer;
        } else if dragging && pointer.is_some() {
            self.drag_current = pointer;
        }

        if stopped {
            if let (Some(a), Some(b)) = (self.drag_start.take(), self.drag_current.take()) {
                let picked = self.map.points_in_box((a.x, a.y), (b.x, b.y));
                log::debug!("box selection picked {} sites", picked.len());
                self.publish(Some(SelectionEvent::from_indices(picked)));
            }
        } else if clicked {
            // Clicks on a site keep the selection; empty space clears it.
            let on_site = pointer.and_then(|p| self.map.site_at((p.x, p.y), reach));
            if on_site.is_none() {
                self.publish(None);
            }
        }
    }

    fn scatter_ui(&self, ui: &mut egui::Ui) {
        let spec = &self.scatter;
        let xm = AxisMapping::new(spec.layout().xaxis.range);
        let ym = AxisMapping::new(spec.layout().yaxis.range);

        ui.label(egui::RichText::new(&spec.layout().title.text).strong());
        Plot::new("isotopic-composition")
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label(spec.layout().xaxis.title.text.as_str())
            .y_axis_label(spec.layout().yaxis.title.text.as_str())
            .x_axis_formatter(move |mark, _| format_tick(xm.to_data(mark.value)))
            .y_axis_formatter(move |mark, _| format_tick(ym.to_data(mark.value)))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [xm.lo, ym.lo],
                    [xm.hi, ym.hi],
                ));
                for (idx, series) in spec.series().iter().enumerate() {
                    let color = color32(series_color(idx));
                    let pts: Vec<[f64; 2]> = series
                        .points()
                        .filter(|(x, y)| x.is_finite() && y.is_finite())
                        .map(|(x, y)| [xm.to_plot(x), ym.to_plot(y)])
                        .collect();
                    match series.mode {
                        SeriesMode::Lines => {
                            plot_ui.line(Line::new(pts).color(color).width(2.0).name(&series.name));
                        }
                        SeriesMode::Markers => {
                            let (shape, radius) = match &series.marker {
                                Some(m) if m.symbol == MarkerSymbol::Diamond => (
                                    MarkerShape::Diamond,
                                    m.size.map(|s| (s / 2.0) as f32).unwrap_or(6.0),
                                ),
                                _ => (MarkerShape::Circle, 4.0),
                            };
                            plot_ui.points(
                                Points::new(pts)
                                    .shape(shape)
                                    .radius(radius)
                                    .filled(true)
                                    .color(color)
                                    .name(&series.name),
                            );
                        }
                    }
                }
            });
    }

    fn export_scatter(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name("isotopic_composition.svg")
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file();
        let Some(path) = picked else {
            return;
        };
        let (w, h) = viz::DEFAULT_SCATTER_SIZE;
        match viz::render_scatter(&self.scatter, &path, w, h) {
            Ok(()) => {
                self.status_message = format!("Wrote {}", path.display());
                self.error_message.clear();
                if let Some(dir) = path.parent() {
                    self.export_dir = dir.to_path_buf();
                }
            }
            Err(err) => {
                self.error_message = format!("Failed to export chart: {}", err);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(BRAND);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.hyperlink_to("Ver código en Github", SOURCE_REPO);
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Clear selection").clicked() {
                    self.publish(None);
                }
                if ui.button("Export scatter…").clicked() {
                    self.export_scatter();
                }
                if !self.status_message.is_empty() {
                    ui.colored_label(Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(Color32::RED, &self.error_message);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                cols[0].label(egui::RichText::new(&self.map.layout().title.text).strong());
                self.map_ui(&mut cols[0]);
                self.scatter_ui(&mut cols[1]);
            });
        });
    }
}
