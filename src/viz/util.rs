//! Utility functions for visualization: axis orientation, colors, tick labels.

use crate::style::Rgb8;
use plotters::prelude::*;

/// Maps a data axis onto an ascending plotting range.
///
/// Plotters wants `lo < hi`; a descending axis (e.g. δ¹⁸O from -7 to -13) is
/// drawn by negating values, and tick labels negate them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    flip: bool,
    pub lo: f64,
    pub hi: f64,
}

impl AxisMapping {
    pub fn new(range: [f64; 2]) -> Self {
        let [start, end] = range;
        if start > end {
            Self {
                flip: true,
                lo: -start,
                hi: -end,
            }
        } else {
            Self {
                flip: false,
                lo: start,
                hi: end,
            }
        }
    }

    #[inline]
    pub fn to_plot(&self, v: f64) -> f64 {
        if self.flip { -v } else { v }
    }

    #[inline]
    pub fn to_data(&self, v: f64) -> f64 {
        self.to_plot(v)
    }
}

#[inline]
pub fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Compact tick label: integers without decimals, otherwise up to two.
pub fn format_tick(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v }; // no "-0"
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Pad a data extent so markers on the edge stay visible. Degenerate extents
/// get a fixed half-width.
pub fn padded_extent(values: impl Iterator<Item = f64>, min_half_width: f64) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    let pad = ((hi - lo) * 0.05).max(min_half_width);
    Some((lo - pad, hi + pad))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_axis_is_negated() {
        let m = AxisMapping::new([-7.0, -13.0]);
        assert_eq!((m.lo, m.hi), (7.0, 13.0));
        assert_eq!(m.to_plot(-9.5), 9.5);
        assert_eq!(m.to_data(9.5), -9.5);
    }

    #[test]
    fn ascending_axis_is_untouched() {
        let m = AxisMapping::new([0.0, 5.0]);
        assert_eq!((m.lo, m.hi), (0.0, 5.0));
        assert_eq!(m.to_plot(2.0), 2.0);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(-30.0), "-30");
        assert_eq!(format_tick(-9.5), "-9.5");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.126), "0.13");
    }

    #[test]
    fn padded_extent_skips_nan() {
        let (lo, hi) = padded_extent([1.0, f64::NAN, 3.0].into_iter(), 0.01).unwrap();
        assert!((lo - 0.9).abs() < 1e-9);
        assert!((hi - 3.1).abs() < 1e-9);
        assert!(padded_extent([f64::NAN].into_iter(), 0.01).is_none());
    }
}
