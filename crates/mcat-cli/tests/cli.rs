//! End-to-end runs of the `mcat-cli` binary on scratch files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn mcat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mcat-cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run mcat-cli")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

const CATALOG: &str = "\
valence,year,acousticness,artists,danceability,duration_ms,energy,explicit,id,instrumentalness,key,liveness,loudness,mode,name,popularity,release_date,speechiness,tempo
0.5,1969,0.3,,0.6,200000,0.7,1,abc123,0.1,13,0.2,-70,1,,55,1969-05-01,0.9,50
0.5,1969,0.3,,0.6,200000,0.7,1,,0.1,13,0.2,-70,1,,55,1969-05-01,0.9,50
";

#[test]
fn clean_catalog_writes_output_and_counters() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("catalog.csv");
    let output = dir.path().join("clean.csv");
    let counters = dir.path().join("counters.json");
    fs::write(&input, CATALOG).unwrap();

    let result = mcat(&[
        "clean-catalog",
        path_str(&input),
        path_str(&output),
        "--chunk-size",
        "1",
        "--counters-out",
        path_str(&counters),
    ]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let cleaned = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = cleaned.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("valence,year"));
    assert_eq!(
        lines[1],
        "0.5,1969,0.3,Unknown Artist,0.6,200000,0.7,1,abc123,0.1,1,0.2,-60.0,1,Unknown Title,55,1969,0.9,50.0"
    );

    let json = fs::read_to_string(&counters).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "ARTISTS_IMPUTED_UNKNOWN": 1,
      "ID_MISSING_DROPPED": 1,
      "KEY_MOD_12": 1,
      "LOUD_CLIPPED": 1,
      "NAME_IMPUTED_UNKNOWN": 1
    }
    "#);
}

#[test]
fn aggregate_writes_yearly_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("catalog.csv");
    let output = dir.path().join("summary.csv");
    fs::write(&input, CATALOG).unwrap();

    let result = mcat(&["aggregate", path_str(&input), path_str(&output), "--sanitize"]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let summary = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(summary, @r"
    year,avg_valence,avg_danceability,avg_energy,avg_acousticness,avg_instrumentalness,avg_liveness,avg_loudness,avg_speechiness,avg_tempo,song_count
    1969,0.5,0.6,0.7,0.3,0.1,0.2,-60.0,0.9,50.0,1
    ");
}

#[test]
fn aggregate_without_rows_in_range_writes_header() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("catalog.csv");
    let output = dir.path().join("summary.csv");
    let header = CATALOG.lines().next().unwrap();
    fs::write(
        &input,
        format!("{header}\n0.5,1900,0.3,x,0.6,200000,0.7,1,abc,0.1,1,0.2,-10.0,1,y,55,1900,0.9,50.0\n"),
    )
    .unwrap();

    let result = mcat(&["aggregate", path_str(&input), path_str(&output)]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "year,avg_valence,avg_danceability,avg_energy,avg_acousticness,avg_instrumentalness,avg_liveness,avg_loudness,avg_speechiness,avg_tempo,song_count\n"
    );
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");
    let result = mcat(&["clean-chart", "/no/such/chart.csv", path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("input file not found"));
    assert!(!output.exists());
}

#[test]
fn wrong_argument_count_prints_usage() {
    let result = mcat(&["clean-catalog", "only-input.csv"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Usage"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("job.toml");
    fs::write(&config, "[rules.artists]\nmax = 3.0\n").unwrap();
    let result = mcat(&["rules", "--config", path_str(&config)]);
    assert_eq!(result.status.code(), Some(1));
}
