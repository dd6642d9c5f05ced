use log::debug;
use std::collections::HashMap;

use crate::table::Row;

/// The cell contents that are treated as a missing answer, after trimming and lowercasing.
const NULL_TOKENS: [&str; 3] = ["nan", "none", "null"];

/// True if a cell carries no answer.
///
/// A cell is empty when it is absent, blank, or one of the null-like tokens
/// written by spreadsheet tools (`nan`, `none`, `null`, in any case).
pub fn is_empty(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(s) => {
            let s = s.trim();
            s.is_empty() || NULL_TOKENS.contains(&s.to_lowercase().as_str())
        }
    }
}

/// Splits a column label into its base name and repetition index.
///
/// `"Question"` is `("Question", 0)`, `"Question.2"` is `("Question", 2)`.
/// Only the last `.<positive integer>` suffix is removed, so a base name may
/// contain dots of its own.
pub fn base_and_index(label: &str) -> (String, usize) {
    let label = label.trim();
    if let Some((head, tail)) = label.rsplit_once('.') {
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            match tail.parse::<usize>() {
                Ok(idx) if idx > 0 => return (head.trim().to_string(), idx),
                _ => {}
            }
        }
    }
    (label.to_string(), 0)
}

/// Renames duplicated header labels the way spreadsheet exports do:
/// the second `Question` becomes `Question.1`, the third `Question.2`, and so on.
///
/// If the generated label is already taken by another column, a suffix is
/// appended to that label in turn: `["a", "a.1", "a"]` becomes
/// `["a", "a.1", "a.1.1"]`.
pub fn dedup_headers(raw: &[String]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut res: Vec<String> = Vec::with_capacity(raw.len());
    for label in raw {
        let mut col = label.clone();
        let mut cur_count = counts.get(&col).copied().unwrap_or(0);
        while cur_count > 0 {
            counts.insert(col.clone(), cur_count + 1);
            col = format!("{}.{}", col, cur_count);
            cur_count = counts.get(&col).copied().unwrap_or(0);
        }
        counts.insert(col.clone(), cur_count + 1);
        res.push(col);
    }
    res
}

/// The columns of a dataset, grouped by base name.
///
/// Each group lists `(index, label)` pairs in increasing index order.
/// It is built once per dataset and shared by all the rows.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColumnGroups {
    groups: HashMap<String, Vec<(usize, String)>>,
}

impl ColumnGroups {
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> ColumnGroups {
        let mut groups: HashMap<String, Vec<(usize, String)>> = HashMap::new();
        for c in columns {
            let label = c.as_ref();
            let (base, idx) = base_and_index(label);
            let entries = groups.entry(base).or_default();
            // Two columns with the same (base, index): the last one wins.
            if let Some(existing) = entries.iter_mut().find(|(i, _)| *i == idx) {
                debug!(
                    "from_columns: label {:?} replaces {:?} at index {}",
                    label, existing.1, idx
                );
                existing.1 = label.to_string();
            } else {
                entries.push((idx, label.to_string()));
            }
        }
        for entries in groups.values_mut() {
            entries.sort_by_key(|(idx, _)| *idx);
        }
        ColumnGroups { groups }
    }

    pub fn get(&self, base: &str) -> Option<&[(usize, String)]> {
        self.groups.get(base).map(|v| v.as_slice())
    }

    /// The label of the column for this base name and repetition index.
    pub fn column_for(&self, base: &str, index: usize) -> Option<&str> {
        self.groups
            .get(base)?
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, label)| label.as_str())
    }

    /// True if more than one column shares this base name.
    pub fn is_repeated(&self, base: &str) -> bool {
        self.groups.get(base).map(|v| v.len() > 1).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Looks up the answer for a base name.
///
/// The column with the given repetition index in the base's group is tried
/// first. If it holds no answer, a column labelled exactly `base` is used.
pub fn resolve<'a>(
    row: &Row<'a>,
    groups: &ColumnGroups,
    base: &str,
    index: usize,
) -> Option<&'a str> {
    if let Some(label) = groups.column_for(base, index) {
        let v = row.get(label);
        if !is_empty(v) {
            return v;
        }
    }
    let v = row.get(base);
    if is_empty(v) {
        None
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn labels(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_values() {
        assert!(is_empty(None));
        assert!(is_empty(Some("")));
        assert!(is_empty(Some("   \t")));
        for token in ["nan", "NaN", "NONE", "None", "null", " Null "] {
            assert!(is_empty(Some(token)), "{:?}", token);
        }
        for token in ["0", "n/a", "nothing", "nan nan", "-"] {
            assert!(!is_empty(Some(token)), "{:?}", token);
        }
    }

    #[test]
    fn decompose_labels() {
        assert_eq!(base_and_index("Question"), ("Question".to_string(), 0));
        assert_eq!(base_and_index("Question.1"), ("Question".to_string(), 1));
        assert_eq!(base_and_index(" Question.12 "), ("Question".to_string(), 12));
        assert_eq!(base_and_index("v1.2.3"), ("v1.2".to_string(), 3));
        assert_eq!(base_and_index("Version 2.0"), ("Version 2.0".to_string(), 0));
        assert_eq!(base_and_index("Ends with dot."), ("Ends with dot.".to_string(), 0));
        assert_eq!(base_and_index("x.1a"), ("x.1a".to_string(), 0));
    }

    #[test]
    fn dedup_like_exports() {
        let raw = labels(&["a", "b", "a", "a", "c"]);
        assert_eq!(dedup_headers(&raw), labels(&["a", "b", "a.1", "a.2", "c"]));

        // An explicit "a.1" column: the third "a" is suffixed onto "a.1".
        let raw = labels(&["a", "a.1", "a"]);
        let columns = dedup_headers(&raw);
        assert_eq!(columns, labels(&["a", "a.1", "a.1.1"]));
        assert_eq!(base_and_index(&columns[2]), ("a.1".to_string(), 1));
        let groups = ColumnGroups::from_columns(&columns);
        assert_eq!(groups.column_for("a", 1), Some("a.1"));
        assert_eq!(groups.column_for("a.1", 1), Some("a.1.1"));
    }

    #[test]
    fn header_round_trip() {
        // Occurrence k of a question decomposes back to (question, k).
        let raw = labels(&["Title", "Q", "Sep", "Q", "Sep", "Q", "Other"]);
        let columns = dedup_headers(&raw);
        let groups = ColumnGroups::from_columns(&columns);

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (label, original) in columns.iter().zip(raw.iter()) {
            let occurrence = seen.entry(original.clone()).or_insert(0);
            assert_eq!(base_and_index(label), (original.clone(), *occurrence));
            assert_eq!(groups.column_for(original, *occurrence), Some(label.as_str()));
            *occurrence += 1;
        }
        assert_eq!(groups.len(), 4);
        assert_eq!(groups.get("Q").map(|g| g.len()), Some(3));
        assert!(groups.is_repeated("Q"));
        assert!(!groups.is_repeated("Title"));
    }

    #[test]
    fn groups_sorted_and_last_write_wins() {
        let columns = labels(&["Q.2", "Q", "Q.1", "R", "R "]);
        let groups = ColumnGroups::from_columns(&columns);
        let q: Vec<usize> = groups.get("Q").unwrap().iter().map(|(i, _)| *i).collect();
        assert_eq!(q, vec![0, 1, 2]);
        assert_eq!(groups.get("R").unwrap(), &[(0, "R ".to_string())]);
        assert_eq!(groups.get("S"), None);
    }

    #[test]
    fn resolve_falls_back_to_direct_lookup() {
        let columns = labels(&["Owner", "Owner.1", "Pillar"]);
        let groups = ColumnGroups::from_columns(&columns);
        let mut table = Table::new(columns);
        table.push_row(vec![
            Some("nan".to_string()),
            Some("Bob".to_string()),
            Some("Ocean".to_string()),
        ]);
        table.push_row(vec![Some("Alice".to_string()), None, None]);

        let r0 = table.row(0).unwrap();
        assert_eq!(resolve(&r0, &groups, "Owner", 0), None);
        assert_eq!(resolve(&r0, &groups, "Owner", 1), Some("Bob"));
        assert_eq!(resolve(&r0, &groups, "Pillar", 0), Some("Ocean"));
        assert_eq!(resolve(&r0, &groups, "Missing", 0), None);

        let r1 = table.row(1).unwrap();
        assert_eq!(resolve(&r1, &groups, "Owner", 0), Some("Alice"));
        assert_eq!(resolve(&r1, &groups, "Pillar", 0), None);
    }
}
