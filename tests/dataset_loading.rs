use isotopos::config::DatasetSource;
use isotopos::{Dataset, DatasetLoader, LoadError};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/isotopes_sample.csv")
}

#[test]
fn loads_fixture_from_path() {
    let loader = DatasetLoader::new().unwrap();
    let ds = loader.load(&DatasetSource::Path(fixture())).unwrap();
    assert_eq!(ds.len(), 5);
    let first = ds.get(0).unwrap();
    assert_eq!(first.kind, "Pozo");
    assert!((first.oxygen_18 - -9.8).abs() < 1e-12);
    assert!((first.deuterium - -68.2).abs() < 1e-12);
    assert!((ds.get(3).unwrap().ratio - 2.4).abs() < 1e-12);
}

#[test]
fn missing_file_is_an_io_error() {
    let loader = DatasetLoader::new().unwrap();
    let err = loader
        .load(&DatasetSource::Path(PathBuf::from("definitely/not/here.csv")))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
}

#[test]
fn missing_columns_are_reported_by_name() {
    let csv = "Lat,Lon,TIPO,OXIG_18\n4.6,-74.1,Pozo,-9.8\n";
    let err = Dataset::from_reader("inline", csv.as_bytes()).unwrap_err();
    match err {
        LoadError::MissingColumns { missing, .. } => {
            assert_eq!(missing, vec!["P/GW".to_string(), "DEUT_2H".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn header_only_table_is_empty() {
    let csv = "Lat,Lon,P/GW,TIPO,OXIG_18,DEUT_2H\n";
    let err = Dataset::from_reader("inline", csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
    assert!(err.to_string().contains("no sample records"));
}

#[test]
fn blank_numeric_cells_become_nan_and_keep_position() {
    let csv = "Lat,Lon,P/GW,TIPO,OXIG_18,DEUT_2H\n\
               4.6,-74.1,0.3,Pozo,-9.8,-68.2\n\
               4.7,-74.0,,Manantial,,-70.0\n\
               4.8,-73.9,0.5,Pozo,-10.0,-71.0\n";
    let ds = Dataset::from_reader("inline", csv.as_bytes()).unwrap();
    assert_eq!(ds.len(), 3);
    let row = ds.get(1).unwrap();
    assert!(row.ratio.is_nan());
    assert!(row.oxygen_18.is_nan());
    assert_eq!(row.deuterium, -70.0);
    assert_eq!(ds.get(2).unwrap().kind, "Pozo");
}

#[test]
fn non_numeric_cell_is_a_csv_error() {
    let csv = "Lat,Lon,P/GW,TIPO,OXIG_18,DEUT_2H\nnorth,-74.1,0.3,Pozo,-9.8,-68.2\n";
    let err = Dataset::from_reader("inline", csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }), "got {err:?}");
}

#[test]
fn tempfile_round_trip_through_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.csv");
    std::fs::write(
        &path,
        " Lat , Lon , P/GW , TIPO , OXIG_18 , DEUT_2H \n 5.0 , -73.5 , 1.2 , Aljibe , -11.0 , -80.0 \n",
    )
    .unwrap();
    let ds = DatasetLoader::new()
        .unwrap()
        .load(&DatasetSource::Path(path))
        .unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.get(0).unwrap().kind, "Aljibe");
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_published_dataset() {
    let ds = DatasetLoader::new()
        .unwrap()
        .load(&DatasetSource::default())
        .unwrap();
    assert!(!ds.is_empty());
}
