use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::{debug, instrument};

use crate::aideon::hierarchy::compact::CompactNodeTable;
use crate::aideon::hierarchy::config::{CsvOptions, HierarchyOptions, Quoting, TextEncoding};
use crate::aideon::hierarchy::error::{HierarchyError, Result};
use crate::aideon::hierarchy::io::columns::{ColumnLayout, NODE_COLUMNS, node_cells};
use crate::aideon::hierarchy::model::NodeTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the table as a header row followed by one row per node, in table
/// order, and returns the absolute location of the file.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), rows = table.len()))]
pub fn save_table(table: &NodeTable, path: &Path, options: &CsvOptions) -> Result<PathBuf> {
    // Resolved before the target is truncated.
    let delimiter = options.delimiter_byte()?;
    let mut file = BufWriter::new(File::create(path)?);
    if options.encoding == TextEncoding::Utf8Bom {
        file.write_all(UTF8_BOM)?;
    }

    let quote_style = match options.quoting {
        Quoting::All => QuoteStyle::Always,
        Quoting::Necessary => QuoteStyle::Necessary,
    };
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .from_writer(file);

    writer.write_record(NODE_COLUMNS)?;
    for node in &table.nodes {
        writer.write_record(node_cells(node))?;
    }
    writer.flush()?;
    drop(writer);

    Ok(fs::canonicalize(path)?)
}

/// Reads a table written by [`save_table`]. A leading byte order mark is
/// skipped whatever the configured encoding.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_table(
    path: &Path,
    csv_options: &CsvOptions,
    options: &HierarchyOptions,
) -> Result<NodeTable> {
    if !path.exists() {
        return Err(HierarchyError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());

    let mut reader = ReaderBuilder::new()
        .delimiter(csv_options.delimiter_byte()?)
        .from_reader(content);
    let layout = ColumnLayout::from_headers(reader.headers()?.iter())?;

    let mut nodes = Vec::new();
    for record in reader.records() {
        let record = record?;
        nodes.push(layout.parse(|index| record.get(index))?);
    }
    debug!(rows = nodes.len(), "loaded node rows");

    Ok(NodeTable::with_nodes(options, nodes))
}

/// Loads a table and re-applies the compact column layout.
pub fn load_compact(
    path: &Path,
    csv_options: &CsvOptions,
    options: &HierarchyOptions,
) -> Result<CompactNodeTable> {
    load_table(path, csv_options, options)?.compact()
}
