// File: crates/casecurve-core/tests/source.rs
// Purpose: JSON dump source: decoding, missing dumps, and upstream failures.

use anyhow::{Context, Result};
use casecurve_core::{aggregate, DataSource, Error, JsonDirSource, MetricKind};

fn write(root: &std::path::Path, location: &str, status: &str, body: &str) -> Result<()> {
    let dir = root.join(location);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    std::fs::write(dir.join(format!("{status}.json")), body).context("writing dump")?;
    Ok(())
}

#[test]
fn reads_api_shaped_records() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    write(
        tmp.path(),
        "POLAND",
        "confirmed",
        r#"[
            {"Country": "Poland", "Province": "", "Cases": 1, "Status": "confirmed", "Date": "2020-03-04T00:00:00Z"},
            {"Country": "Poland", "Province": "", "Cases": 5, "Status": "confirmed", "Date": "2020-03-05T00:00:00Z"},
            {"Country": "Poland", "Province": "", "Cases": 6, "Status": "confirmed", "Date": "2020-03-06T00:00:00Z"}
        ]"#,
    )?;
    let source = JsonDirSource::new(tmp.path());
    let records = source.fetch("POLAND", MetricKind::Confirmed)?;
    assert_eq!(records.len(), 3);
    assert_eq!(aggregate(&records)?.values(), vec![1.0, 5.0]);
    Ok(())
}

#[test]
fn missing_dump_is_an_empty_reply() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let source = JsonDirSource::new(tmp.path());
    assert!(source.fetch("NOWHERE", MetricKind::Deaths)?.is_empty());
    Ok(())
}

#[test]
fn malformed_payloads_are_upstream_errors() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    write(tmp.path(), "POLAND", "deaths", "{not json")?;
    write(tmp.path(), "POLAND", "recovered", r#"[{"Cases": 1, "Date": "yesterday"}]"#)?;
    let source = JsonDirSource::new(tmp.path());

    for metric in [MetricKind::Deaths, MetricKind::Recovered] {
        match source.fetch("POLAND", metric) {
            Err(Error::UpstreamFetch { location, metric: m, .. }) => {
                assert_eq!(location, "POLAND");
                assert_eq!(m, metric);
            }
            other => panic!("expected UpstreamFetch, got {other:?}"),
        }
    }
    Ok(())
}
