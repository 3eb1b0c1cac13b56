use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a panel specification (scatter chart or map) as pretty Plotly JSON.
pub fn save_json<T: Serialize, P: AsRef<Path>>(figure: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(figure)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::figure::compose_scatter;
    use crate::models::Selection;
    use tempfile::tempdir;

    #[test]
    fn writes_plotly_shaped_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scatter.json");
        let csv = "Lat,Lon,P/GW,TIPO,OXIG_18,DEUT_2H\n4.9,-73.9,0.5,POZO,-9.1,-62.0\n";
        let ds = Dataset::from_reader("mem", csv.as_bytes()).unwrap();
        save_json(&compose_scatter(&ds, &Selection::all()), &path).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["data"].as_array().unwrap().len(), 3);
        assert_eq!(v["data"][0]["mode"], "markers");
        assert_eq!(v["data"][1]["marker"]["symbol"], "diamond");
        assert_eq!(v["data"][2]["mode"], "lines");
        assert_eq!(v["layout"]["xaxis"]["range"][0], -7.0);
        assert_eq!(v["layout"]["yaxis"]["range"][1], -90.0);
    }
}
