//! Organogram Layout Dump
//!
//! Standalone binary that restores the saved chart from disk, runs it through
//! the same projection and layout the UI uses, and prints the result as JSON.
//! Handy for checking a snapshot or diffing layout changes.
//!
//! # Usage
//!
//! ```bash
//! # Lay out the chart saved under ~/.organogram
//! cargo run --bin org-layout
//!
//! # Grade-banded layout of matching positions only
//! ORG_LAYOUT_MODE=grade ORG_SEARCH=engineer cargo run --bin org-layout
//! ```
//!
//! # Environment Variables
//!
//! - `ORG_DATA_DIR`: Snapshot directory (default: `~/.organogram`)
//! - `ORG_REFERENCE_DATA`: JSON file with departments, designations and employees
//! - `ORG_LAYOUT_MODE`: `depth` or `grade` (default: `depth`)
//! - `ORG_SEARCH`: Search filter applied before layout
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use organogram_core::{
    FileSnapshotStore, GradeBand, OrgChartConfig, OrgChartService, OrgFilters, OrgLayout,
    ReferenceData, RestorePolicy,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutReport<'a> {
    employee_count: usize,
    vacant_count: usize,
    layout: Option<&'a OrgLayout>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    grade_bands: Vec<GradeBand>,
}

fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = env::var("ORG_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?;
    Ok(home_dir.join(".organogram"))
}

fn load_reference_data() -> anyhow::Result<ReferenceData> {
    match env::var("ORG_REFERENCE_DATA") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read reference data {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid reference data in {}", path))
        }
        Err(_) => Ok(ReferenceData::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = data_dir()?;
    tracing::info!("📦 Snapshot directory: {}", data_dir.display());

    let grade_sort = match env::var("ORG_LAYOUT_MODE").as_deref() {
        Ok("grade") => true,
        Ok("depth") | Err(_) => false,
        Ok(other) => anyhow::bail!("Unknown ORG_LAYOUT_MODE '{}' (expected depth or grade)", other),
    };
    let filters = OrgFilters {
        search: env::var("ORG_SEARCH").unwrap_or_default(),
        grade_sort,
        ..Default::default()
    };

    let reference = Arc::new(load_reference_data()?);
    let store = Arc::new(FileSnapshotStore::new(data_dir));
    let config = OrgChartConfig::default().with_restore_policy(RestorePolicy::RestoreSaved);
    let service = OrgChartService::new(reference, store, config);

    let layout = service.layout(&filters);
    if layout.is_none() {
        tracing::warn!("No position matches the current filters");
    }

    let report = LayoutReport {
        employee_count: service.employee_count(),
        vacant_count: service.vacant_count(),
        grade_bands: layout.as_ref().map(OrgLayout::grade_bands).unwrap_or_default(),
        layout: layout.as_ref(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
