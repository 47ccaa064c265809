use asymptote_core::{PageExtractor, PageResult};
use asymptote_logging::asy_info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::RawPage;

/// One output line: the page title next to its channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    #[serde(flatten)]
    pub page: PageResult,
}

/// Extracts every page in parallel; output order follows input order.
pub fn extract_all(extractor: &PageExtractor, pages: &[RawPage]) -> Vec<PageRecord> {
    let records: Vec<PageRecord> = pages
        .par_iter()
        .map(|raw| PageRecord {
            title: raw.title.clone(),
            page: extractor.extract(&raw.text),
        })
        .collect();
    asy_info!("Extracted {} pages", records.len());
    records
}

/// Serializes records as JSON lines, each terminated by `\n`.
pub fn to_json_lines(records: &[PageRecord]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}
