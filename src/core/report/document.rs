//! Aggregate summary document writer

use super::aggregator::AggregateReport;
use super::parser::Counters;
use super::xml::XmlElement;
use crate::config::{ExportConfig, ReportConfig};
use crate::domain::{DocketError, Result};
use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Renders an [`AggregateReport`] as a pretty-printed XML document
///
/// Element order under `Export`: configuration, export statistics,
/// per-partition details, file statistics, throughput, MIME types.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root_element: String,
    platform_version: String,
    details_label: String,
    rate_field: String,
}

impl ReportWriter {
    pub fn new(report: &ReportConfig, export: &ExportConfig) -> Self {
        Self {
            root_element: report.root_element.clone(),
            platform_version: report
                .platform_version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            details_label: export.details_label.clone(),
            rate_field: report.rate_field.clone(),
        }
    }

    /// Serialize the report to bytes
    pub fn render(&self, report: &AggregateReport) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new(self.root_element.as_str());
        root.push_attribute(("version", self.platform_version.as_str()));
        root.push_attribute(("architecture", std::env::consts::ARCH));
        writer.write_event(Event::Start(root))?;

        self.export_element(report).write_to(&mut writer)?;

        writer.write_event(Event::End(BytesEnd::new(self.root_element.as_str())))?;

        let mut bytes = writer.into_inner().into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the report to `path`, replacing any existing file
    pub fn write(&self, report: &AggregateReport, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "Writing summary report");
        let bytes = self.render(report)?;
        std::fs::write(path, bytes).map_err(|e| DocketError::file_system("write", path, e))
    }

    fn export_element(&self, report: &AggregateReport) -> XmlElement {
        let mut export = XmlElement::new("Export")
            .with_attribute(
                "startTime",
                report.start_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .with_attribute(
                "endTime",
                report.end_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .with_attribute("exportDuration", report.export_duration.to_string())
            .with_attribute("processingDuration", format!("{:.3}", report.processing_duration()));

        match &report.configuration {
            Some(configuration) => export = export.with_child(configuration.clone()),
            None => tracing::warn!("No export configuration captured; omitting it from the summary"),
        }

        let details = report.details.iter().fold(
            XmlElement::new(format!("{}Details", self.details_label)),
            |parent, detail| {
                let entry = detail
                    .attributes()
                    .into_iter()
                    .fold(XmlElement::new(self.details_label.as_str()), |e, (k, v)| {
                        e.with_attribute(k, v)
                    });
                parent.with_child(entry)
            },
        );

        let mimes = report.mime_stats.iter().fold(
            XmlElement::new("MimeTypes"),
            |parent, (name, count)| {
                parent.with_child(
                    XmlElement::new("MimeType")
                        .with_attribute("name", name.as_str())
                        .with_attribute("count", count.to_string()),
                )
            },
        );

        export
            .with_child(counters_element("ExportStatistics", &report.export_stats))
            .with_child(details)
            .with_child(counters_element("FileStatistics", &report.file_stats))
            .with_child(
                XmlElement::new("ThroughputStatistics").with_child(
                    XmlElement::new(self.rate_field.as_str()).with_text(report.throughput.to_string()),
                ),
            )
            .with_child(XmlElement::new("MimeTypeStatistics").with_child(mimes))
    }
}

fn counters_element(name: &str, counters: &Counters) -> XmlElement {
    counters.iter().fold(XmlElement::new(name), |parent, (key, value)| {
        parent.with_child(XmlElement::new(key.as_str()).with_text(value.to_string()))
    })
}
