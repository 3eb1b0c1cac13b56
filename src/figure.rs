//! Figure composer for the isotope composition (δ¹⁸O vs δ²H) panel.
//!
//! The chart always holds three series, in this order:
//! 1. observed groundwater samples (restricted to the current selection),
//! 2. the annual precipitation reference point,
//! 3. the global meteoric water line.
//!
//! Axis ranges are fixed and descending on both axes, following the usual
//! orientation of isotope plots. [`ChartSpec`] serializes to Plotly figure
//! JSON so any Plotly front end can draw it.

use crate::dataset::Dataset;
use crate::models::Selection;
use crate::reference::{GMWL_X, GMWL_Y, PRECIPITATION_POINT};
use serde::Serialize;

pub const SCATTER_TITLE: &str = "Relación P/GW-δ18O precipitación y agua subterránea";
pub const SAMPLES_NAME: &str = "Composición isotópica del agua subterránea";
pub const PRECIPITATION_NAME: &str = "Composición isotópica de la precipitación anual";
pub const GMWL_NAME: &str = "Linea Meteórica Global (GMWL)";
pub const X_TITLE: &str = "δ¹⁸O";
pub const Y_TITLE: &str = "δ²H";

/// δ¹⁸O axis, [start, end] (descending).
pub const X_RANGE: [f64; 2] = [-7.0, -13.0];
/// δ²H axis, [start, end] (descending).
pub const Y_RANGE: [f64; 2] = [-30.0, -90.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Scatter,
    Scattermapbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMode {
    Markers,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSymbol {
    Circle,
    Diamond,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub symbol: MarkerSymbol,
}

/// One trace of the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    #[serde(rename = "type")]
    pub trace: TraceType,
    pub name: String,
    pub mode: SeriesMode,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Series {
    fn samples(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            trace: TraceType::Scatter,
            name: SAMPLES_NAME.into(),
            mode: SeriesMode::Markers,
            x,
            y,
            marker: None,
        }
    }

    fn precipitation() -> Self {
        Self {
            trace: TraceType::Scatter,
            name: PRECIPITATION_NAME.into(),
            mode: SeriesMode::Markers,
            x: vec![PRECIPITATION_POINT.0],
            y: vec![PRECIPITATION_POINT.1],
            marker: Some(Marker {
                size: Some(12.0),
                symbol: MarkerSymbol::Diamond,
            }),
        }
    }

    fn gmwl() -> Self {
        Self {
            trace: TraceType::Scatter,
            name: GMWL_NAME.into(),
            mode: SeriesMode::Lines,
            x: GMWL_X.to_vec(),
            y: GMWL_Y.to_vec(),
            marker: None,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) pairs in trace order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub range: [f64; 2],
}

impl Axis {
    /// True when the range runs from a larger to a smaller value.
    pub fn is_descending(&self) -> bool {
        self.range[0] > self.range[1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub template: String,
    pub title: Title,
    pub legend: Legend,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Layout {
    fn isotope_composition() -> Self {
        Self {
            template: "plotly_white".into(),
            title: SCATTER_TITLE.into(),
            legend: Legend {
                x: 0.0,
                y: 0.98,
                xanchor: "left".into(),
                yanchor: "top".into(),
            },
            xaxis: Axis {
                title: X_TITLE.into(),
                range: X_RANGE,
            },
            yaxis: Axis {
                title: Y_TITLE.into(),
                range: Y_RANGE,
            },
        }
    }
}

/// Renderable description of the scatter panel.
///
/// Only [`compose_scatter`] builds one, so the three series are always
/// present in their fixed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "data")]
    series: Vec<Series>,
    layout: Layout,
}

impl ChartSpec {
    /// All series in trace order (samples, precipitation, GMWL).
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The observed samples series.
    pub fn samples(&self) -> &Series {
        &self.series[0]
    }

    pub fn precipitation(&self) -> &Series {
        &self.series[1]
    }

    pub fn gmwl(&self) -> &Series {
        &self.series[2]
    }
}

/// Build the scatter chart for `selection` (every record when empty).
///
/// Pure function of its inputs. Positions outside the dataset are skipped.
pub fn compose_scatter(dataset: &Dataset, selection: &Selection) -> ChartSpec {
    let (x, y): (Vec<f64>, Vec<f64>) = dataset
        .select(selection)
        .map(|r| (r.oxygen_18, r.deuterium))
        .unzip();

    ChartSpec {
        series: vec![Series::samples(x, y), Series::precipitation(), Series::gmwl()],
        layout: Layout::isotope_composition(),
    }
}

/// Called with every freshly composed chart (preview, debugging, tests).
pub type PreviewHook = Box<dyn Fn(&ChartSpec) + Send + Sync>;

/// Composer bound to the loaded dataset, with an optional preview hook.
pub struct FigureComposer {
    dataset: Dataset,
    preview: Option<PreviewHook>,
}

impl FigureComposer {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            preview: None,
        }
    }

    pub fn with_preview(mut self, hook: PreviewHook) -> Self {
        self.preview = Some(hook);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn compose(&self, selection: &Selection) -> ChartSpec {
        let spec = compose_scatter(&self.dataset, selection);
        if let Some(hook) = &self.preview {
            hook(&spec);
        }
        spec
    }
}

impl std::fmt::Debug for FigureComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureComposer")
            .field("dataset", &self.dataset.origin())
            .field("preview", &self.preview.is_some())
            .finish()
    }
}
