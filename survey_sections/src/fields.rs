use log::debug;
use std::collections::HashSet;

use crate::columns::{base_and_index, is_empty, resolve, ColumnGroups};
use crate::config::SectionConfig;
use crate::table::Row;

/// The answered questions that are asked only once and not rendered elsewhere.
///
/// Base names are visited in the order of their first column. Excluded base names
/// and repeated families (more than one column) are skipped.
pub fn general_items(
    row: &Row<'_>,
    groups: &ColumnGroups,
    exclusions: &HashSet<String>,
) -> Vec<(String, String)> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut res: Vec<(String, String)> = Vec::new();
    for col in row.columns() {
        let (base, _) = base_and_index(col);
        if !seen.insert(base.clone()) {
            continue;
        }
        if exclusions.contains(&base) {
            continue;
        }
        match groups.get(&base) {
            Some([(_, label)]) => {
                if let Some(v) = row.get(label).filter(|v| !is_empty(Some(*v))) {
                    res.push((base, v.to_string()));
                }
            }
            Some(_) => {
                debug!("general_items: skipping repeated family {:?}", base);
            }
            None => {}
        }
    }
    res
}

/// All the trailing questions, in their configured order.
///
/// Unanswered questions get the placeholder answer, so the result always has one
/// entry per trailing question.
pub fn data_quality_items(
    row: &Row<'_>,
    groups: &ColumnGroups,
    config: &SectionConfig,
) -> Vec<(String, String)> {
    config
        .trailing_questions
        .iter()
        .map(|question| {
            let answer = resolve(row, groups, question.trim(), 0)
                .map(|s| s.to_string())
                .unwrap_or_else(|| config.placeholder.clone());
            (question.clone(), answer)
        })
        .collect()
}

/// The answered fields among `fields`, in the given order.
pub fn metadata_items<S: AsRef<str>>(
    row: &Row<'_>,
    groups: &ColumnGroups,
    fields: &[S],
) -> Vec<(String, String)> {
    fields
        .iter()
        .filter_map(|f| {
            let f = f.as_ref();
            resolve(row, groups, f, 0).map(|v| (f.to_string(), v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::dedup_headers;
    use crate::table::Table;

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        let raw: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        let mut t = Table::new(dedup_headers(&raw));
        for cells in rows {
            t.push_row(cells.iter().map(|s| Some(s.to_string())).collect());
        }
        t
    }

    fn pairs(xs: &[(&str, &str)]) -> Vec<(String, String)> {
        xs.iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn general_skips_excluded_and_repeated() {
        let t = table(
            &["ObjectID", "Title", "Question", "Question", "Notes", "Empty"],
            &[&["1", "Doc A", "Q1", "Q1b", "some notes", "null"]],
        );
        let groups = ColumnGroups::from_columns(t.columns());
        let exclusions = SectionConfig::default().exclusions();
        let res = general_items(&t.row(0).unwrap(), &groups, &exclusions);
        assert_eq!(res, pairs(&[("Title", "Doc A"), ("Notes", "some notes")]));
    }

    #[test]
    fn data_quality_always_complete() {
        let config = SectionConfig::default();
        let q0 = config.trailing_questions[0].as_str();
        let q3 = config.trailing_questions[3].as_str();
        let t = table(
            &["Title", q3, q0],
            &[&["Doc", "Some equipment", "NaN"], &["", "", ""]],
        );
        let groups = ColumnGroups::from_columns(t.columns());

        for row in t.rows() {
            let res = data_quality_items(&row, &groups, &config);
            assert_eq!(res.len(), config.trailing_questions.len());
            for ((q, a), expected_q) in res.iter().zip(config.trailing_questions.iter()) {
                assert_eq!(q, expected_q);
                assert!(!is_empty(Some(a.as_str())));
            }
        }

        let res = data_quality_items(&t.row(0).unwrap(), &groups, &config);
        assert_eq!(res[0].1, config.placeholder);
        assert_eq!(res[3].1, "Some equipment");
    }

    #[test]
    fn metadata_only_answered() {
        let t = table(
            &["Metadata Owner", "Data Pillar"],
            &[&["Alice", " "]],
        );
        let groups = ColumnGroups::from_columns(t.columns());
        let res = metadata_items(
            &t.row(0).unwrap(),
            &groups,
            &["Metadata Owner", "Data Pillar", "Unknown"],
        );
        assert_eq!(res, pairs(&[("Metadata Owner", "Alice")]));
    }
}
