//! isotopos
//!
//! Library behind the groundwater isotope dashboard: a map of sampling sites
//! colored by their precipitation/groundwater (P/GW) ratio, paired with a
//! δ¹⁸O–δ²H scatter plot that follows the map selection and is referenced
//! against the global meteoric water line.
//!
//! ### Features
//! - Load the sampling table once, from a URL or a local CSV file
//! - Compose the isotope scatter chart for any selection of sites
//! - Keep the scatter chart in sync with map selection events
//! - Export both panels as Plotly JSON, SVG or PNG
//!
//! ### Example
//! ```no_run
//! use isotopos::{Config, DatasetLoader, FigureComposer, SelectionEvent, ViewController};
//!
//! let cfg = Config::from_env();
//! let dataset = DatasetLoader::new()?.load(&cfg.dataset)?;
//! let mut view = ViewController::new(FigureComposer::new(dataset));
//! let chart = view.on_selection(Some(&SelectionEvent::from_indices([0, 2])));
//! isotopos::viz::render_scatter(chart, "scatter.svg", 700, 900)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod export;
pub mod figure;
pub mod map;
pub mod models;
pub mod reference;
pub mod style;
pub mod viz;

pub use config::{Config, DatasetSource};
pub use controller::{SelectionSource, ViewController, ViewState};
pub use dataset::{Dataset, DatasetLoader};
pub use error::LoadError;
pub use figure::{ChartSpec, FigureComposer, compose_scatter};
pub use map::{ColorScale, MapPanel};
pub use models::{SampleRecord, SelectedPoint, Selection, SelectionEvent};
