//! Summary reporting
//!
//! - [`parser`] - per-partition report documents
//! - [`aggregator`] - merging partitions into one [`AggregateReport`]
//! - [`document`] - writing the aggregate document
//! - [`consolidate`] - concatenating per-partition artifacts
//! - [`summarizer`] - the whole summary stage over one export root
//! - [`xml`] - owned XML values for the captured export configuration

pub mod aggregator;
pub mod consolidate;
pub mod document;
pub mod parser;
pub mod summarizer;
pub mod xml;

pub use aggregator::{merge_counters, partition_dirs, AggregateReport, ReportAggregator};
pub use consolidate::ArtifactConsolidator;
pub use document::ReportWriter;
pub use parser::{
    lower_first, parse_report, parse_report_file, Counters, PartitionDetails,
    PartitionReportStats, EXPORT_STAT_FIELDS,
};
pub use summarizer::{Summarizer, SummaryOutput};
pub use xml::{XmlElement, XmlNode};
