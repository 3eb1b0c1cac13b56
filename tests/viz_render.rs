use isotopos::{Dataset, MapPanel, Selection, compose_scatter, viz};
use std::fs;
use std::path::Path;

fn dataset() -> Dataset {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/isotopes_sample.csv");
    Dataset::from_reader(path, fs::File::open(path).unwrap()).unwrap()
}

fn assert_non_empty(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} has content", path.display());
}

#[test]
fn scatter_svg() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scatter.svg");
    let spec = compose_scatter(&dataset(), &Selection::from_indices([0, 2]));
    viz::render_scatter(&spec, &out, 700, 900).unwrap();
    assert_non_empty(&out);
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn scatter_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("scatter.png");
    let spec = compose_scatter(&dataset(), &Selection::all());
    viz::render_scatter(&spec, &out, 700, 900).unwrap();
    assert_non_empty(&out);
}

#[test]
fn map_svg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    let panel = MapPanel::from_dataset(&dataset(), None);
    for name in ["map.svg", "map.png"] {
        let out = dir.path().join(name);
        viz::render_map(&panel, &out, 900, 900).unwrap();
        assert_non_empty(&out);
    }
}
