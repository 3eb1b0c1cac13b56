//! Fixed reference data drawn on every isotope composition chart.

/// Weighted annual precipitation composition (δ¹⁸O, δ²H).
pub const PRECIPITATION_POINT: (f64, f64) = (-9.394303, -65.224002);

/// Global meteoric water line vertices, δ¹⁸O.
pub const GMWL_X: [f64; 22] = [
    -5.0, -5.5, -6.0, -6.5, -7.0, -7.5, -8.0, -8.5, -9.0, -9.5, -10.0, -10.5, -11.0, -11.5, -12.0,
    -12.5, -13.0, -13.5, -14.0, -14.5, -15.0, -20.0,
];

/// Global meteoric water line vertices, δ²H.
pub const GMWL_Y: [f64; 22] = [
    -28.0, -32.01, -36.02, -40.03, -44.04, -48.05, -52.06, -56.07, -60.08, -64.09, -68.1, -72.11,
    -76.12, -80.13, -84.14, -88.15, -92.16, -96.17, -100.18, -104.19, -108.2, -148.3,
];

/// GMWL as (δ¹⁸O, δ²H) pairs, in drawing order.
pub fn gmwl_vertices() -> impl Iterator<Item = (f64, f64)> {
    GMWL_X.iter().copied().zip(GMWL_Y.iter().copied())
}
