//! Visualization utilities: render the dashboard panels to **SVG** or **PNG**.
//!
//! - Scatter panel: samples, precipitation point and GMWL, with the fixed
//!   (descending) axis ranges of the [`ChartSpec`]
//! - Map panel: sites on a lon/lat plane colored by P/GW, with a horizontal
//!   colorbar underneath
//!
//! No map tiles are drawn; the interactive front end owns the basemap.

pub mod types;
pub mod util;

pub use types::{DEFAULT_MAP_SIZE, DEFAULT_SCATTER_SIZE, ImageFormat};

use crate::figure::{ChartSpec, MarkerSymbol, SeriesMode};
use crate::map::{COLORBAR_TITLE, MapPanel};
use crate::style::{series_color, viridis};
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use util::{AxisMapping, format_tick, padded_extent, rgb};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::error!("embedded DejaVuSans.ttf could not be registered");
        }
    });
}

const MARGIN: u32 = 16;

/// Render the scatter panel to `out_path` (`.svg` or bitmap).
pub fn render_scatter<P: AsRef<Path>>(
    spec: &ChartSpec,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    match ImageFormat::from_path(out_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_scatter(root, spec)
        }
        ImageFormat::Png => {
            let root =
                BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_scatter(root, spec)
        }
    }
}

/// Render the map panel to `out_path` (`.svg` or bitmap).
pub fn render_map<P: AsRef<Path>>(
    panel: &MapPanel,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if panel.is_empty() {
        return Err(anyhow!("no sites to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    match ImageFormat::from_path(out_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_map(root, panel)
        }
        ImageFormat::Png => {
            let root =
                BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            draw_map(root, panel)
        }
    }
}

fn draw_scatter<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let xm = AxisMapping::new(spec.layout().xaxis.range);
    let ym = AxisMapping::new(spec.layout().yaxis.range);

    let mut chart = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(&spec.layout().title.text, (FontFamily::SansSerif, 18))
        .set_label_area_size(LabelAreaPosition::Left, 56)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(xm.lo..xm.hi, ym.lo..ym.hi)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |v: &f64| format_tick(xm.to_data(*v));
    let y_label_fmt = |v: &f64| format_tick(ym.to_data(*v));

    chart
        .configure_mesh()
        .x_desc(spec.layout().xaxis.title.text.as_str())
        .y_desc(spec.layout().yaxis.title.text.as_str())
        .x_labels(8)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for (idx, series) in spec.series().iter().enumerate() {
        let color = rgb(series_color(idx));
        let pts: Vec<(f64, f64)> = series
            .points()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| (xm.to_plot(x), ym.to_plot(y)))
            .collect();
        // Plotly marker size is a diameter in px.
        let radius = series
            .marker
            .as_ref()
            .and_then(|m| m.size)
            .map(|s| (s / 2.0).round() as i32)
            .unwrap_or(4);
        let symbol = series
            .marker
            .as_ref()
            .map(|m| m.symbol)
            .unwrap_or(MarkerSymbol::Circle);

        let anno = match (series.mode, symbol) {
            (SeriesMode::Lines, _) => chart
                .draw_series(LineSeries::new(pts, color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?,
            (SeriesMode::Markers, MarkerSymbol::Circle) => chart
                .draw_series(
                    pts.into_iter()
                        .map(|p| Circle::new(p, radius, color.filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?,
            (SeriesMode::Markers, MarkerSymbol::Diamond) => chart
                .draw_series(pts.into_iter().map(|p| {
                    EmptyElement::at(p)
                        + Polygon::new(
                            vec![(0, -radius), (-radius, 0), (0, radius), (radius, 0)],
                            color.filled(),
                        )
                }))
                .map_err(|e| anyhow!("{:?}", e))?,
        };

        let label = anno.label(series.name.clone());
        match (series.mode, symbol) {
            (SeriesMode::Lines, _) => {
                label.legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
            (SeriesMode::Markers, MarkerSymbol::Circle) => {
                label.legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
            }
            (SeriesMode::Markers, MarkerSymbol::Diamond) => {
                label.legend(move |(x, y)| {
                    Polygon::new(
                        vec![(x + 10, y - 5), (x + 5, y), (x + 10, y + 5), (x + 15, y)],
                        color.filled(),
                    )
                });
            }
        }
    }

    // Legend anchored top-left, as in the layout.
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_map<DB>(root: DrawingArea<DB, Shift>, panel: &MapPanel) -> Result<()>
where
    DB: DrawingBackend,
{
    const COLORBAR_BAND_PX: i32 = 72;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (_, root_h) = root.dim_in_pixel();
    let (plot_area, band) = root.split_vertically((root_h as i32 - COLORBAR_BAND_PX).max(40));

    let trace = panel.trace();
    let (lon_lo, lon_hi) = padded_extent(trace.lon.iter().copied(), 0.01)
        .ok_or_else(|| anyhow!("no valid longitudes"))?;
    let (lat_lo, lat_hi) = padded_extent(trace.lat.iter().copied(), 0.01)
        .ok_or_else(|| anyhow!("no valid latitudes"))?;

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .caption(&panel.layout().title.text, (FontFamily::SansSerif, 18))
        .set_label_area_size(LabelAreaPosition::Left, 56)
        .set_label_area_size(LabelAreaPosition::Bottom, 36)
        .build_cartesian_2d(lon_lo..lon_hi, lat_lo..lat_hi)
        .map_err(|e| anyhow!("{:?}", e))?;

    let coord_fmt = |v: &f64| format!("{:.2}", v);
    chart
        .configure_mesh()
        .x_desc("Lon")
        .y_desc("Lat")
        .x_label_formatter(&coord_fmt)
        .y_label_formatter(&coord_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let radius = (trace.marker.size / 2.0).round() as i32;
    let colors = panel.point_colors();
    chart
        .draw_series(
            trace
                .lon
                .iter()
                .zip(trace.lat.iter())
                .zip(colors)
                .filter(|((lon, lat), _)| lon.is_finite() && lat.is_finite())
                .map(|((lon, lat), c)| Circle::new((*lon, *lat), radius, rgb(c).filled())),
        )
        .map_err(|e| anyhow!("{:?}", e))?;

    draw_colorbar(&band, panel)?;

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    band.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Horizontal Viridis colorbar with the scale bounds at both ends.
fn draw_colorbar<DB>(band: &DrawingArea<DB, Shift>, panel: &MapPanel) -> Result<()>
where
    DB: DrawingBackend,
{
    const STEPS: i32 = 120;
    let scale = panel.color_scale();
    let (w, _) = band.dim_in_pixel();
    let w = w as i32;
    let (x0, x1) = (w / 10, w - w / 10);
    let (top, bottom) = (22, 38);

    band.draw(&Text::new(
        COLORBAR_TITLE,
        (w / 2, 2),
        TextStyle::from((FontFamily::SansSerif, 13)).pos(Pos::new(HPos::Center, VPos::Top)),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    for i in 0..STEPS {
        let t = i as f64 / (STEPS - 1) as f64;
        let xa = x0 + (x1 - x0) * i / STEPS;
        let xb = x0 + (x1 - x0) * (i + 1) / STEPS;
        band.draw(&Rectangle::new(
            [(xa, top), (xb, bottom)],
            rgb(viridis(t)).filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let tick_style = |h: HPos| TextStyle::from((FontFamily::SansSerif, 12)).pos(Pos::new(h, VPos::Top));
    band.draw(&Text::new(
        format_tick(scale.cmin),
        (x0, bottom + 4),
        tick_style(HPos::Left),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    band.draw(&Text::new(
        format_tick(scale.cmax),
        (x1, bottom + 4),
        tick_style(HPos::Right),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
