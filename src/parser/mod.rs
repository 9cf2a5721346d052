pub mod assemble;
pub mod lines;
pub mod segment;

use tracing::{info, warn};

pub use assemble::Record;

pub struct ParseOutcome {
    pub line_count: usize,
    pub records: Vec<Record>,
    pub rejected: usize,
}

/// Three-stage pipeline: text → line arena → segmented records → accepted records.
pub fn parse_document(text: &str) -> ParseOutcome {
    let lines = lines::split_lines(text);
    let segmented = segment::segment(&lines);
    let total = segmented.len();
    let records: Vec<Record> = segmented.into_iter().filter(assemble::accept).collect();
    let rejected = total - records.len();

    info!(lines = lines.len(), kept = records.len(), rejected, "document parsed");
    if records.is_empty() {
        warn!("no questions found; is there a category header in the input?");
    }

    ParseOutcome {
        line_count: lines.len(),
        records,
        rejected,
    }
}

/// Segmentation without the acceptance filter.
pub fn parse_unfiltered(text: &str) -> Vec<Record> {
    segment::segment(&lines::split_lines(text))
}

// ── Tests ──
