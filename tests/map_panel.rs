use isotopos::map::{MAP_CENTER, MAP_STYLE, MAP_ZOOM};
use isotopos::style::viridis;
use isotopos::{ColorScale, Dataset, MapPanel};

fn dataset() -> Dataset {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/isotopes_sample.csv");
    Dataset::from_reader(path, std::fs::File::open(path).unwrap()).unwrap()
}

#[test]
fn upper_bound_is_second_highest_ratio() {
    let scale = ColorScale::for_dataset(&dataset()).unwrap();
    assert_eq!(scale.cmin, 0.20);
    assert_eq!(scale.cmax, 0.80);
}

#[test]
fn maximum_saturates_at_top_color() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    let colors = panel.point_colors();
    // Row 3 holds the maximum (2.40), row 1 the second highest (0.80).
    assert_eq!(colors[3], colors[1]);
    assert_eq!(colors[3], viridis(1.0));
    assert_eq!(colors[4], viridis(0.0));
}

#[test]
fn single_value_is_both_bounds() {
    let scale = ColorScale::from_ratios([1.5]).unwrap();
    assert_eq!((scale.cmin, scale.cmax), (1.5, 1.5));
    assert_eq!(scale.normalize(1.5), 0.5);
    assert!(ColorScale::from_ratios([f64::NAN]).is_none());
}

#[test]
fn nan_ratios_are_ignored_for_bounds() {
    let scale = ColorScale::from_ratios([0.1, f64::NAN, 0.9, 0.4]).unwrap();
    assert_eq!((scale.cmin, scale.cmax), (0.1, 0.4));
}

#[test]
fn panel_covers_every_site() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    assert_eq!(panel.len(), 5);
    let t = panel.trace();
    assert_eq!(t.text, vec!["Pozo", "Manantial", "Pozo", "Aljibe", "Manantial"]);
    assert_eq!(t.marker.color, vec![0.35, 0.80, 0.55, 2.40, 0.20]);
}

#[test]
fn serializes_map_layout() {
    let panel = MapPanel::from_dataset(&dataset(), Some("pk.test-token"));
    let v = serde_json::to_value(&panel).unwrap();
    assert_eq!(v["data"][0]["type"], "scattermapbox");
    assert_eq!(v["data"][0]["marker"]["colorscale"], "Viridis");
    assert_eq!(v["data"][0]["marker"]["cmax"], 0.8);
    assert_eq!(v["data"][0]["marker"]["colorbar"]["orientation"], "h");
    assert_eq!(v["layout"]["mapbox"]["accesstoken"], "pk.test-token");
    assert_eq!(v["layout"]["mapbox"]["style"], MAP_STYLE);
    assert_eq!(v["layout"]["mapbox"]["zoom"], MAP_ZOOM);
    assert_eq!(v["layout"]["mapbox"]["center"]["lat"], MAP_CENTER.0);
    assert_eq!(v["layout"]["hovermode"], "closest");
}

#[test]
fn token_is_omitted_when_unset() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    let v = serde_json::to_value(&panel).unwrap();
    assert!(v["layout"]["mapbox"].get("accesstoken").is_none());
}

#[test]
fn box_selection_is_inclusive_and_corner_agnostic() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    // Corners given top-right then bottom-left.
    let picked = panel.points_in_box((-73.70, 4.95), (-73.90, 4.60));
    assert_eq!(picked, vec![2, 4]);
    assert!(panel.points_in_box((0.0, 0.0), (1.0, 1.0)).is_empty());
}

#[test]
fn repeated_maximum_is_the_upper_bound() {
    let scale = ColorScale::from_ratios([2.0, 0.5, 2.0]).unwrap();
    assert_eq!((scale.cmin, scale.cmax), (0.5, 2.0));
}

#[test]
fn click_hits_nearest_site_within_reach() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    // Between rows 1 (-74.05, 4.75) and 0 (-74.10, 4.60), closer to row 1.
    assert_eq!(panel.site_at((-74.06, 4.74), (0.05, 0.05)), Some(1));
    assert_eq!(panel.site_at((-73.90, 4.95), (0.01, 0.01)), Some(2));
}

#[test]
fn click_on_empty_space_hits_nothing() {
    let panel = MapPanel::from_dataset(&dataset(), None);
    assert_eq!(panel.site_at((-73.0, 4.0), (0.05, 0.05)), None);
    assert_eq!(panel.site_at((-73.90, 4.95), (0.0, 0.0)), None);
}
