//! Integration tests for loading the NEO CSV and close-approach JSON files.

use neoscope::core::loader::{load_approaches, load_neos};
use neoscope::{NeoDatabase, NeoError};
use std::path::Path;

const NEOS_CSV: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,H,G,M1,M2,K1,K2,PC,diameter,extent,albedo
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,10.4,0.46,,,,,,16.84,34.4x11.2x11.2,0.25
a0001036,2001036,\"  1036 Ganymed (A924 UB)\",1036,Ganymed,,Y,N,9.25,0.3,,,,,,37.675,,0.238
bK19A00B,3843580,\"       (2019 AB)\",2019 AB,,,Y,Y,25.5,,,,,,,,,
";

const CAD_JSON: &str = r#"{
  "signature": {"version": "1.1", "source": "NASA/JPL SBDB Close Approach Data API"},
  "count": "4",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["433", "659", "2415020.507669610", "1900-Jan-01 00:11", "0.3149", "0.3148", "0.3150", "5.58", "5.57", "< 00:01", "10.4"],
    ["2019 AB", "14", "2458485.5", "2019-Jan-02 12:00", "0.0021", "0.0020", "0.0022", "9.81", "9.70", "00:05", "25.5"],
    ["433", "659", "2417000.5", "1907-Nov-05 03:31", "0.4714", "0.4713", "0.4715", "4.76", "4.75", "< 00:01", "10.4"],
    ["1999 XX", "3", "2451544.5", "2000-Jan-01 00:00", "0.1", "0.1", "0.1", "7.0", "7.0", "00:02", "22.0"]
  ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_and_links_real_shaped_files() {
    let dir = tempfile::tempdir().unwrap();
    let neo_path = write(dir.path(), "neos.csv", NEOS_CSV);
    let cad_path = write(dir.path(), "cad.json", CAD_JSON);

    let neos = load_neos(&neo_path).unwrap();
    assert_eq!(neos.len(), 3);
    assert!(neos[2].name.is_none());
    assert!(neos[2].diameter.is_nan());
    assert!(neos[2].hazardous);

    let approaches = load_approaches(&cad_path).unwrap();
    assert_eq!(approaches.len(), 4);

    let db = NeoDatabase::new(neos, approaches);
    let eros = db.get_by_name("Eros").unwrap();
    assert_eq!(eros.approaches.len(), 2);
    let times: Vec<String> = db.approaches_of(eros).map(|v| v.time_str()).collect();
    assert_eq!(times, vec!["1900-01-01 00:11", "1907-11-05 03:31"]);

    assert_eq!(db.get_by_designation("2019 AB").unwrap().approaches.len(), 1);
    assert!(db.get_by_designation("1036").unwrap().approaches.is_empty());
    assert_eq!(db.unresolved_count(), 1);
}

#[test]
fn missing_files_are_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(matches!(load_neos(&missing), Err(NeoError::Load(_))));
    assert!(matches!(load_approaches(&missing), Err(NeoError::Load(_))));
}

#[test]
fn non_array_row_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "bad.json",
        r#"{"fields": ["des", "cd", "dist", "v_rel"], "data": [{"des": "433"}]}"#,
    );
    let err = load_approaches(&path).unwrap_err();
    assert!(err.to_string().contains("Row 0"), "got: {err}");
}

#[test]
fn empty_response_without_data_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "empty.json",
        r#"{"count": "0", "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel"]}"#,
    );
    assert!(load_approaches(&path).unwrap().is_empty());
}
