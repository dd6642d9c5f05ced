use log::debug;
use std::collections::HashSet;

use survey_sections::{
    base_and_index, data_quality_items, extract_sections, general_items, metadata_items, resolve,
    ColumnGroups, Row, SectionBlock, SectionConfig,
};

/// A field that may provide the title of a document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TitleField {
    pub field: String,
    /// If true, the heading reads `<field>: <value>` instead of the bare value.
    pub show_label: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DocumentSettings {
    /// Tried in order, the first answered field wins.
    pub title_fields: Vec<TitleField>,
    /// Fields shown at the top of the document, under the title.
    pub metadata_fields: Vec<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        DocumentSettings {
            title_fields: vec![
                TitleField {
                    field: "Title".to_string(),
                    show_label: false,
                },
                TitleField {
                    field: "Title of Tier I Data Submitted".to_string(),
                    show_label: false,
                },
                TitleField {
                    field: "GlobalID".to_string(),
                    show_label: true,
                },
            ],
            metadata_fields: vec!["Metadata Owner".to_string(), "Data Pillar".to_string()],
        }
    }
}

impl DocumentSettings {
    /// The first title field answered in this row, with its answer.
    pub fn find_title<'a>(
        &self,
        row: &Row<'a>,
        groups: &ColumnGroups,
    ) -> Option<(&TitleField, &'a str)> {
        self.title_fields.iter().find_map(|tf| {
            let (base, idx) = base_and_index(&tf.field);
            resolve(row, groups, &base, idx).map(|v| (tf, v))
        })
    }

    /// The raw title value, used to name the output file.
    pub fn file_title<'a>(&self, row: &Row<'a>, groups: &ColumnGroups) -> Option<&'a str> {
        self.find_title(row, groups).map(|(_, v)| v)
    }

    pub fn heading(&self, row: &Row<'_>, groups: &ColumnGroups) -> String {
        match self.find_title(row, groups) {
            Some((tf, v)) if tf.show_label => format!("{}: {}", tf.field, v.trim()),
            Some((_, v)) => v.trim().to_string(),
            None => format!("Submission {}", row.index()),
        }
    }
}

/// Everything that is printed for one submission, in order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SubmissionDocument {
    pub title: String,
    pub metadata: Vec<(String, String)>,
    /// One block per attached file.
    pub files: Vec<SectionBlock>,
    pub general: Vec<(String, String)>,
    /// Never empty: every trailing question is listed.
    pub data_quality: Vec<(String, String)>,
}

impl SubmissionDocument {
    pub fn from_row(
        row: &Row<'_>,
        groups: &ColumnGroups,
        sections: &SectionConfig,
        exclusions: &HashSet<String>,
        settings: &DocumentSettings,
    ) -> SubmissionDocument {
        let doc = SubmissionDocument {
            title: settings.heading(row, groups),
            metadata: metadata_items(row, groups, &settings.metadata_fields),
            files: extract_sections(row, sections),
            general: general_items(row, groups, exclusions),
            data_quality: data_quality_items(row, groups, sections),
        };
        debug!(
            "from_row: row {}: title {:?}, {} files, {} general items",
            row.index(),
            doc.title,
            doc.files.len(),
            doc.general.len()
        );
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_sections::{dedup_headers, Table, NO_RESPONSE_PLACEHOLDER};

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        let raw: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        let mut t = Table::new(dedup_headers(&raw));
        for cells in rows {
            t.push_row(cells.iter().map(|s| Some(s.to_string())).collect());
        }
        t
    }

    fn document(t: &Table, idx: usize) -> SubmissionDocument {
        let groups = ColumnGroups::from_columns(t.columns());
        let sections = SectionConfig::default();
        SubmissionDocument::from_row(
            &t.row(idx).unwrap(),
            &groups,
            &sections,
            &sections.exclusions(),
            &DocumentSettings::default(),
        )
    }

    #[test]
    fn two_rows_with_repeated_questions() {
        let t = table(
            &["Title", "Question", "Question", "Answer", "Answer"],
            &[&["Doc A", "Q1", "Q1b", "A1", ""], &["", "", "", "", ""]],
        );

        let doc = document(&t, 0);
        assert_eq!(doc.title, "Doc A");
        assert!(doc.metadata.is_empty());
        assert!(doc.files.is_empty());
        // Question and Answer are repeated families outside the file questions:
        // they are left out of the general section.
        assert_eq!(
            doc.general,
            vec![("Title".to_string(), "Doc A".to_string())]
        );
        assert_eq!(
            doc.data_quality.len(),
            SectionConfig::default().trailing_questions.len()
        );
        assert!(doc
            .data_quality
            .iter()
            .all(|(_, a)| a == NO_RESPONSE_PLACEHOLDER));

        let doc = document(&t, 1);
        assert_eq!(doc.title, "Submission 1");
        assert!(doc.general.is_empty());
    }

    #[test]
    fn title_priority_and_labels() {
        let t = table(
            &["GlobalID", "Title of Tier I Data Submitted", "Metadata Owner", "Data Pillar"],
            &[
                &["{1234}", "Sea ice", "Alice", "Cryosphere"],
                &["{5678}", "nan", "", "Ocean"],
            ],
        );
        let groups = ColumnGroups::from_columns(t.columns());
        let settings = DocumentSettings::default();

        let r0 = t.row(0).unwrap();
        assert_eq!(settings.heading(&r0, &groups), "Sea ice");
        assert_eq!(settings.file_title(&r0, &groups), Some("Sea ice"));

        let r1 = t.row(1).unwrap();
        assert_eq!(settings.heading(&r1, &groups), "GlobalID: {5678}");
        assert_eq!(settings.file_title(&r1, &groups), Some("{5678}"));

        let doc = document(&t, 0);
        assert_eq!(
            doc.metadata,
            vec![
                ("Metadata Owner".to_string(), "Alice".to_string()),
                ("Data Pillar".to_string(), "Cryosphere".to_string()),
            ]
        );
        assert!(doc.general.is_empty());
        let doc = document(&t, 1);
        assert_eq!(
            doc.metadata,
            vec![("Data Pillar".to_string(), "Ocean".to_string())]
        );
    }
}
