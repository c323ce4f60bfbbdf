//! Every fixture SVG must convert into a structurally valid DXF document.

mod common;

use datatest_stable::Utf8Path;
use svgdxf::{ConvertOptions, Notice, svg_to_dxf_with};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn convert_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    init_tracing();
    let svg = std::fs::read_to_string(path)?;

    let mut notices: Vec<Notice> = Vec::new();
    let dxf = svg_to_dxf_with(&svg, &ConvertOptions::default(), &mut notices)
        .map_err(|e| format!("{path}: {e}"))?;
    for notice in &notices {
        tracing::debug!(%path, "{notice}");
    }

    common::validate(&dxf).map_err(|e| format!("{path}: {e}"))?;
    if common::entities(&dxf).is_empty() {
        return Err(format!("{path}: no entities produced").into());
    }
    Ok(())
}

datatest_stable::harness! {
    { test = convert_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.svg$" },
}
