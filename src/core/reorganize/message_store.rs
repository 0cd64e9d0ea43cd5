//! Message-store naming rule
//!
//! The export engine names message stores generically (`Export.pst`,
//! `Export1.pst`, ...). Consolidation swaps the prefix for the custodian
//! name: `Export1.pst` becomes `Jones1.pst`.

use crate::domain::{CustodianName, DocketError, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct MessageStoreNaming {
    pattern: Regex,
    extension: String,
}

impl MessageStoreNaming {
    /// Build the rule for files named `<prefix>*.<extension>`
    pub fn new(prefix: &str, extension: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^{}(.*)\.{}$",
            regex::escape(prefix),
            regex::escape(extension)
        ))
        .map_err(|e| DocketError::Configuration(format!("Invalid message store pattern: {e}")))?;

        Ok(Self {
            pattern,
            extension: extension.to_string(),
        })
    }

    /// Whether a file is a message store, regardless of its prefix
    pub fn is_message_store(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// New file name for an engine-generated message store, `None` if the name doesn't match
    pub fn renamed(&self, file_name: &str, custodian: &CustodianName) -> Option<String> {
        let captures = self.pattern.captures(file_name)?;
        let suffix = captures.get(1).map_or("", |m| m.as_str());
        Some(format!("{}{}.{}", custodian, suffix, self.extension))
    }
}
