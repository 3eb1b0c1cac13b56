//! Public types and constants for the visualization module.

use std::path::Path;

/// Output image format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// `.svg` (any case) renders SVG; everything else renders a bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Default panel size in pixels; the scatter panel is portrait like the
/// dashboard column it mirrors.
pub const DEFAULT_SCATTER_SIZE: (u32, u32) = (700, 900);
pub const DEFAULT_MAP_SIZE: (u32, u32) = (900, 900);
