//! Turns retrieved records into the text context handed to the model.

use crate::models::ResultRecord;

/// Line placed between two record blocks.
pub const BLOCK_SEPARATOR: &str = "\n---\n";

/// Render one record as a labelled four-line block.
fn render_block(record: &ResultRecord) -> String {
    format!(
        "Source: {}\nTitle: {}\nURL: {}\nSnippet: {}\n",
        record.source_name, record.title, record.link, record.snippet
    )
}

/// Concatenate records into a single context string, preserving order.
///
/// Field values are inserted as-is; empty fields still produce their line.
/// An empty slice yields an empty string.
pub fn build_context(results: &[ResultRecord]) -> String {
    results
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
