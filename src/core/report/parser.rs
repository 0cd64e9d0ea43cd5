//! Per-partition report document parser
//!
//! Reads one partition's `summary-report.xml` into [`PartitionReportStats`].
//! The partition name comes from the document's parent directory.

use super::xml::XmlElement;
use crate::domain::{DocketError, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Fixed export-statistics fields, in document order
pub const EXPORT_STAT_FIELDS: [&str; 4] = [
    "SelectedItems",
    "ExcludedCount",
    "TotalItemsToExport",
    "FailedItems",
];

/// Ordered mapping of counter name to count
pub type Counters = IndexMap<String, u64>;

/// Statistics parsed from one partition's report document
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionReportStats {
    /// Partition (custodian) name
    pub name: String,
    /// Export duration in whole seconds
    pub export_duration: u64,
    /// The four fixed export statistics
    pub export_stats: Counters,
    /// Open-ended file statistics
    pub file_stats: Counters,
    /// Counts per MIME type
    pub mime_stats: Counters,
    /// Captured export configuration, if the document carried one
    pub configuration: Option<XmlElement>,
}

impl PartitionReportStats {
    /// Detail record for the aggregate's per-partition list
    pub fn details(&self) -> PartitionDetails {
        PartitionDetails {
            name: self.name.clone(),
            export_duration: self.export_duration,
            export_stats: self.export_stats.clone(),
        }
    }
}

/// One entry of the aggregate's per-partition details list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionDetails {
    pub name: String,
    pub export_duration: u64,
    pub export_stats: Counters,
}

impl PartitionDetails {
    /// Attributes as written to the document; stat names are lower-camel-cased
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attributes = Vec::with_capacity(self.export_stats.len() + 2);
        attributes.push(("name".to_string(), self.name.clone()));
        attributes.push(("exportDuration".to_string(), self.export_duration.to_string()));
        for (key, value) in &self.export_stats {
            attributes.push((lower_first(key), value.to_string()));
        }
        attributes
    }
}

/// Lowercase the first character: `SelectedItems` becomes `selectedItems`
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a report document from disk
///
/// # Errors
///
/// Returns `DocketError::MalformedReport` if the file cannot be read, is not
/// XML, or lacks a required field.
pub fn parse_report_file(path: &Path) -> Result<PartitionReportStats> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| DocketError::malformed(path, format!("unreadable: {e}")))?;
    parse_report(&contents, path)
}

/// Parse report document text; `path` supplies the partition name and error context
pub fn parse_report(xml: &str, path: &Path) -> Result<PartitionReportStats> {
    let name = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DocketError::malformed(path, "no parent directory to name the partition"))?;

    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| DocketError::malformed(path, format!("XML parse error: {e}")))?;

    let export = child_element(doc.root_element(), "Export")
        .ok_or_else(|| DocketError::malformed(path, "missing Export element"))?;

    let export_duration = export
        .attribute("exportDuration")
        .ok_or_else(|| DocketError::malformed(path, "missing exportDuration attribute"))
        .and_then(|value| {
            parse_duration(value).ok_or_else(|| {
                DocketError::malformed(path, format!("invalid exportDuration '{value}'"))
            })
        })?;

    let export_stats_node = child_element(export, "ExportStatistics")
        .ok_or_else(|| DocketError::malformed(path, "missing ExportStatistics element"))?;
    let mut export_stats = Counters::new();
    for field in EXPORT_STAT_FIELDS {
        let node = child_element(export_stats_node, field).ok_or_else(|| {
            DocketError::malformed(path, format!("missing ExportStatistics/{field}"))
        })?;
        export_stats.insert(field.to_string(), parse_count(path, field, node.text())?);
    }

    let mut file_stats = Counters::new();
    if let Some(stats) = child_element(export, "FileStatistics") {
        for node in stats.children().filter(|n| n.is_element()) {
            let key = node.tag_name().name();
            let count = parse_counter(path, key, node.text());
            *file_stats.entry(key.to_string()).or_insert(0) += count;
        }
    }

    let mut mime_stats = Counters::new();
    if let Some(types) =
        child_element(export, "MimeTypeStatistics").and_then(|n| child_element(n, "MimeTypes"))
    {
        for node in types.children().filter(|n| n.is_element()) {
            let Some(mime) = node.attribute("name") else {
                tracing::warn!(report = %path.display(), "Skipping MimeType without name");
                continue;
            };
            let count = parse_counter(path, mime, node.attribute("count"));
            *mime_stats.entry(mime.to_string()).or_insert(0) += count;
        }
    }

    let configuration = child_element(export, "ExportConfiguration").map(XmlElement::from_node);

    Ok(PartitionReportStats {
        name,
        export_duration,
        export_stats,
        file_stats,
        mime_stats,
        configuration,
    })
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Whole seconds, truncating any fractional part
fn parse_duration(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    let secs = value.parse::<f64>().ok()?;
    (secs.is_finite() && secs >= 0.0).then(|| secs.trunc() as u64)
}

fn parse_count(path: &Path, field: &str, text: Option<&str>) -> Result<u64> {
    let text = text.map(str::trim).unwrap_or_default();
    text.parse::<u64>().map_err(|_| {
        DocketError::malformed(path, format!("{field} is not an integer: '{text}'"))
    })
}

/// Open-ended counters coerce: empty is 0, fractions truncate, anything else is 0
fn parse_counter(path: &Path, field: &str, text: Option<&str>) -> u64 {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return 0;
    }
    parse_duration(text).unwrap_or_else(|| {
        tracing::warn!(
            report = %path.display(),
            field = %field,
            value = %text,
            "Counter is not numeric, counting as 0"
        );
        0
    })
}
