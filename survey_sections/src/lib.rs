/*!
Reconstructs the structure of flat survey exports.

Survey123 (and most form tools) export one row per submission. When a question
is asked several times (once per attached file, for example), the export repeats
the column header and the duplicates get a numeric suffix: `Question`,
`Question.1`, `Question.2`, ...

This crate recovers that structure and splits the answers of a row into:
- repeated blocks ([extract_sections]), one per attached file,
- general questions asked only once ([general_items]),
- a fixed list of trailing questions that are always reported ([data_quality_items]).

```
use survey_sections::*;

let header: Vec<String> = ["Title", "Dependencies", "Do you have additional files to add?", "Dependencies"]
    .iter()
    .map(|s| s.to_string())
    .collect();
let mut table = Table::new(dedup_headers(&header));
table.push_row(vec![
    Some("Doc A".to_string()),
    Some("numpy".to_string()),
    Some("Yes".to_string()),
    Some("pandas".to_string()),
]);
let groups = ColumnGroups::from_columns(table.columns());
let config = SectionConfig::default();
let row = table.row(0).unwrap();

let files = extract_sections(&row, &config);
assert_eq!(files.len(), 2);
assert_eq!(data_quality_items(&row, &groups, &config).len(), config.trailing_questions.len());
```
*/

mod columns;
mod config;
mod fields;
mod sections;
mod table;

pub use crate::columns::*;
pub use crate::config::*;
pub use crate::fields::*;
pub use crate::sections::*;
pub use crate::table::*;
