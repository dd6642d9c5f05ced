use log::debug;

use crate::columns::{base_and_index, is_empty};
use crate::config::SectionConfig;
use crate::table::Row;

/// The answered questions of one repeated block, as (question, answer) pairs.
/// Never contains an empty answer.
pub type SectionBlock = Vec<(String, String)>;

/// Reconstructs the repeated blocks (one per attached file) of a row.
///
/// The columns are read in their original order. A run of repeatable questions
/// forms one block. A block is closed by the separator question, by any other
/// field, or by the first trailing question, which also ends the scan.
/// Unanswered questions are dropped, and so are blocks left empty.
pub fn extract_sections(row: &Row<'_>, config: &SectionConfig) -> Vec<SectionBlock> {
    // Blocks of (base, column label), before looking at the values.
    let mut blocks: Vec<Vec<(String, &str)>> = Vec::new();
    let mut current: Vec<(String, &str)> = Vec::new();

    for col in row.columns() {
        let (base, _) = base_and_index(col);

        if config.is_trailing(&base) {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            break;
        }

        if base == config.separator {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        if config.repeatable_questions.contains(&base) {
            current.push((base, col.as_str()));
        } else if !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    debug!(
        "extract_sections: row {}: {} candidate blocks",
        row.index(),
        blocks.len()
    );

    blocks
        .into_iter()
        .map(|block| {
            block
                .into_iter()
                .filter_map(|(base, col)| {
                    let v = row.get(col);
                    if is_empty(v) {
                        None
                    } else {
                        v.map(|s| (base, s.to_string()))
                    }
                })
                .collect::<SectionBlock>()
        })
        .filter(|block| !block.is_empty())
        .collect()
}
