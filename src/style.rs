//! Colors shared by the headless renderer and the dashboard.

use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Default series colorway, in trace order (samples, precipitation, GMWL).
const SERIES10: [Rgb8; 10] = [
    Rgb8::new(99, 110, 250),  // #636EFA
    Rgb8::new(239, 85, 59),   // #EF553B
    Rgb8::new(0, 204, 150),   // #00CC96
    Rgb8::new(171, 99, 250),  // #AB63FA
    Rgb8::new(255, 161, 90),  // #FFA15A
    Rgb8::new(25, 211, 243),  // #19D3F3
    Rgb8::new(255, 102, 146), // #FF6692
    Rgb8::new(182, 232, 128), // #B6E880
    Rgb8::new(255, 151, 255), // #FF97FF
    Rgb8::new(254, 203, 82),  // #FECB52
];

#[inline]
pub fn series_color(idx: usize) -> Rgb8 {
    SERIES10[idx % SERIES10.len()]
}

/// Viridis control points, evenly spaced on [0, 1].
const VIRIDIS: [Rgb8; 10] = [
    Rgb8::new(68, 1, 84),
    Rgb8::new(72, 40, 120),
    Rgb8::new(62, 73, 137),
    Rgb8::new(49, 104, 142),
    Rgb8::new(38, 130, 142),
    Rgb8::new(31, 158, 137),
    Rgb8::new(53, 183, 121),
    Rgb8::new(110, 206, 88),
    Rgb8::new(181, 222, 43),
    Rgb8::new(253, 231, 37),
];

/// Sample the Viridis ramp at `t`; `t` is clamped to [0, 1], NaN maps to the
/// bottom color.
pub fn viridis(t: f64) -> Rgb8 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[hi]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    Rgb8::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), VIRIDIS[0]);
        assert_eq!(viridis(1.0), VIRIDIS[9]);
        assert_eq!(viridis(7.5), VIRIDIS[9]);
        assert_eq!(viridis(-1.0), VIRIDIS[0]);
        assert_eq!(viridis(f64::NAN), VIRIDIS[0]);
    }

    #[test]
    fn hex_is_upper_case() {
        assert_eq!(Rgb8::new(99, 110, 250).to_hex(), "#636EFA");
    }
}
