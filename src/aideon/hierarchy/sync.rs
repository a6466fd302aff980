use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::aideon::hierarchy::config::Settings;
use crate::aideon::hierarchy::error::Result;
use crate::aideon::hierarchy::flatten::{build_from_paths, build_from_tree};
use crate::aideon::hierarchy::io::{delimited, excel_read, excel_write, json, paths};
use crate::aideon::hierarchy::model::{NodeTable, Timestamp};
use crate::aideon::hierarchy::reconstruct::reconstruct;
use crate::aideon::hierarchy::validate::diagnose;

/// Builds a table from a newline-separated path list and saves it as CSV.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn paths_to_csv(
    input: &Path,
    output: &Path,
    settings: &Settings,
    now: Timestamp,
) -> Result<PathBuf> {
    let raw_paths = paths::read_paths(input)?;
    info!(line_count = raw_paths.len(), "read path list");
    let table = build_from_paths(&raw_paths, &settings.hierarchy, now);
    report_violations(&table);
    delimited::save_table(&table, output, &settings.csv)
}

/// Flattens a JSON tree document and saves it as CSV.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn tree_to_csv(
    input: &Path,
    output: &Path,
    settings: &Settings,
    now: Timestamp,
) -> Result<PathBuf> {
    let tree = json::read_tree(input)?;
    let table = build_from_tree(&tree, &settings.hierarchy, now);
    delimited::save_table(&table, output, &settings.csv)
}

/// Loads a CSV table and writes the tree under its lowest-id root as JSON.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn csv_to_tree(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let compact = delimited::load_compact(input, &settings.csv, &settings.hierarchy)?;
    info!(row_count = compact.len(), "loaded table");
    let tree = reconstruct(&compact.expand())?;
    json::write_tree(output, &tree)
}

/// Flattens a JSON tree document into a workbook.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn tree_to_excel(
    input: &Path,
    output: &Path,
    settings: &Settings,
    now: Timestamp,
) -> Result<()> {
    let tree = json::read_tree(input)?;
    let table = build_from_tree(&tree, &settings.hierarchy, now);
    excel_write::write_table(output, &table)
}

/// Reads a workbook table and writes the tree under its lowest-id root as JSON.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn excel_to_tree(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let table = excel_read::read_table(input, &settings.hierarchy)?.compact()?.expand();
    info!(row_count = table.len(), "read table from workbook");
    let tree = reconstruct(&table)?;
    json::write_tree(output, &tree)
}

fn report_violations(table: &NodeTable) {
    for violation in diagnose(table) {
        warn!(%violation, "table breaks a hierarchy invariant");
    }
}
