//! Map panel: every sampling site, colored by its P/GW ratio.
//!
//! The panel is built once from the dataset and never changes afterwards;
//! only the scatter panel reacts to selections made on it.

use crate::dataset::Dataset;
use crate::figure::{SeriesMode, Title, TraceType};
use crate::style::{Rgb8, viridis};
use serde::Serialize;

pub const MAP_TITLE: &str = "Puntos de muestreos de agua subterránea";
pub const MAP_STYLE: &str = "mapbox://styles/mapbox/outdoors-v12";
/// Sabana de Bogotá, (lat, lon).
pub const MAP_CENTER: (f64, f64) = (4.91, -73.96);
pub const MAP_ZOOM: f64 = 8.5;
pub const MARKER_SIZE: f64 = 8.0;
pub const COLORBAR_TITLE: &str = "P/GW";

/// Color-scale bounds for the ratio values.
///
/// `cmax` is the second-highest ratio, not the maximum; the maximum
/// saturates at the top color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub cmin: f64,
    pub cmax: f64,
}

impl ColorScale {
    /// Bounds over the finite values in `ratios`. A single value is used for
    /// both ends. `None` when there is no finite value at all.
    pub fn from_ratios(ratios: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut vals: Vec<f64> = ratios.into_iter().filter(|v| v.is_finite()).collect();
        vals.sort_by(|a, b| b.total_cmp(a));
        let cmin = *vals.last()?;
        let cmax = vals.get(1).copied().unwrap_or(vals[0]);
        Some(Self { cmin, cmax })
    }

    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        Self::from_ratios(dataset.records().iter().map(|r| r.ratio))
    }

    /// Position of `value` on the scale, clamped to [0, 1].
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.cmax - self.cmin;
        if span.abs() < f64::EPSILON {
            return if value > self.cmax {
                1.0
            } else if value < self.cmin {
                0.0
            } else {
                0.5
            };
        }
        ((value - self.cmin) / span).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> Rgb8 {
        viridis(self.normalize(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
    pub orientation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub size: f64,
    pub symbol: String,
    pub colorscale: String,
    /// Ratio per site; the front end maps it through the colorscale.
    pub color: Vec<f64>,
    pub cmin: f64,
    pub cmax: f64,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTrace {
    #[serde(rename = "type")]
    pub trace: TraceType,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub mode: SeriesMode,
    /// Site type, shown on hover.
    pub text: Vec<String>,
    pub marker: MapMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
    pub bearing: f64,
    pub center: LatLon,
    pub pitch: f64,
    pub zoom: f64,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub autosize: bool,
    pub hovermode: String,
    pub title: Title,
    pub mapbox: MapView,
}

/// Renderable description of the map panel. Built by
/// [`MapPanel::from_dataset`] only, always with exactly one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPanel {
    #[serde(rename = "data")]
    traces: Vec<MapTrace>,
    layout: MapLayout,
}

impl MapPanel {
    pub fn from_dataset(dataset: &Dataset, access_token: Option<&str>) -> Self {
        let records = dataset.records();
        let scale = ColorScale::for_dataset(dataset).unwrap_or(ColorScale {
            cmin: 0.0,
            cmax: 0.0,
        });
        let trace = MapTrace {
            trace: TraceType::Scattermapbox,
            lat: records.iter().map(|r| r.lat).collect(),
            lon: records.iter().map(|r| r.lon).collect(),
            mode: SeriesMode::Markers,
            text: records.iter().map(|r| r.kind.clone()).collect(),
            marker: MapMarker {
                size: MARKER_SIZE,
                symbol: "circle".into(),
                colorscale: "Viridis".into(),
                color: records.iter().map(|r| r.ratio).collect(),
                cmin: scale.cmin,
                cmax: scale.cmax,
                colorbar: ColorBar {
                    title: COLORBAR_TITLE.into(),
                    orientation: "h".into(),
                },
            },
        };
        Self {
            traces: vec![trace],
            layout: MapLayout {
                autosize: true,
                hovermode: "closest".into(),
                title: MAP_TITLE.into(),
                mapbox: MapView {
                    accesstoken: access_token.map(str::to_string),
                    bearing: 0.0,
                    center: LatLon {
                        lat: MAP_CENTER.0,
                        lon: MAP_CENTER.1,
                    },
                    pitch: 0.0,
                    zoom: MAP_ZOOM,
                    style: MAP_STYLE.into(),
                },
            },
        }
    }

    pub fn trace(&self) -> &MapTrace {
        &self.traces[0]
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.trace().lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn color_scale(&self) -> ColorScale {
        let m = &self.trace().marker;
        ColorScale {
            cmin: m.cmin,
            cmax: m.cmax,
        }
    }

    /// Resolved color of every site, in row order.
    pub fn point_colors(&self) -> Vec<Rgb8> {
        let scale = self.color_scale();
        self.trace()
            .marker
            .color
            .iter()
            .map(|v| scale.color(*v))
            .collect()
    }

    /// Site closest to `at` (lon, lat) among those within `reach` (lon, lat
    /// half-widths). `None` means `at` is empty space.
    pub fn site_at(&self, at: (f64, f64), reach: (f64, f64)) -> Option<usize> {
        let (rx, ry) = (reach.0.abs(), reach.1.abs());
        if rx == 0.0 || ry == 0.0 {
            return None;
        }
        let t = self.trace();
        t.lon
            .iter()
            .zip(t.lat.iter())
            .enumerate()
            .filter_map(|(i, (lon, lat))| {
                let d = ((lon - at.0) / rx).powi(2) + ((lat - at.1) / ry).powi(2);
                (d <= 1.0).then_some((i, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Row positions whose (lon, lat) fall inside the given box (inclusive,
    /// corners in any order). Used to turn a box-drag into a selection.
    pub fn points_in_box(&self, a: (f64, f64), b: (f64, f64)) -> Vec<usize> {
        let (lon_lo, lon_hi) = (a.0.min(b.0), a.0.max(b.0));
        let (lat_lo, lat_hi) = (a.1.min(b.1), a.1.max(b.1));
        let t = self.trace();
        t.lon
            .iter()
            .zip(t.lat.iter())
            .enumerate()
            .filter(|(_, (lon, lat))| {
                (lon_lo..=lon_hi).contains(*lon) && (lat_lo..=lat_hi).contains(*lat)
            })
            .map(|(i, _)| i)
            .collect()
    }
}
