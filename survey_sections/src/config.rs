// ********* Section configuration **********

use std::collections::HashSet;

/// The questions asked at the end of every Survey123 submission.
/// They are always collected together in the "Data Quality" section.
pub const DATA_QUALITY_QUESTIONS: [&str; 9] = [
    "Are you aware of special collection methods or theories used in collecting the original data?",
    "What were the goals during the collection of the original data?",
    "Is there an apparent piece of context missing from this data collection that would help to better analyze it?",
    "Was there specific equipment or machinery used for collecting this data?",
    "Are there any critical contextual papers necessary for the interpretation of this data collection?",
    "Are there any other potential causes of errors obvious for this data collection?",
    "Does the absence of data in certain areas reflect a true absence, or could it be due to factors such as collection methods, material degradation, or other biases?",
    "Are there other data that are missing from the data set that would benefit these data?",
    "Are there any specific kinds of technologies or programs that were used to analyze, modify, or manage these data?",
];

/// The question between two repeated file blocks.
pub const FILE_SECTION_SEPARATOR: &str = "Do you have additional files to add?";

/// The questions asked once per attached file.
pub const FILE_QUESTIONS: [&str; 11] = [
    "Please provide a title that clearly describes your file.",
    "Please provide up to 4 keywords to describe this file.",
    "Please provide a detailed description of the file as a whole.",
    "Please define each field or column in your file (e.g. column in a csv, layer in a NetCDF)",
    "How would you describe the overall nature of the data?",
    "Please provide a comment explaining your choice regarding data nature",
    "Modifications",
    "Please list any citations or references that provide context for the methodologies used in collecting or processing this data.",
    "Please provide details on the model and any experiment-specific configuration:",
    "Please submit here links to any external descriptions, code, or documentation relevant to this file.",
    "Dependencies",
];

/// System fields added by Survey123, and the metadata fields rendered in their own block.
pub const SYSTEM_FIELDS: [&str; 12] = [
    "ObjectID",
    "GlobalID",
    "CreationDate",
    "EditDate",
    "Creator",
    "Editor",
    "Owner",
    "Metadata Owner",
    "Title of Tier I Data Submitted",
    "Data Pillar",
    "x",
    "y",
];

pub const NO_RESPONSE_PLACEHOLDER: &str = "No response provided.";

/// Describes how the fields of a row are split into sections.
///
/// All the matching is done on exact (trimmed) base names.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SectionConfig {
    /// Questions that close the repeated blocks. They are rendered in this order
    /// in the data quality section, answered or not.
    pub trailing_questions: Vec<String>,
    /// A question that marks the boundary between two repeated blocks.
    pub separator: String,
    /// Questions that belong to a repeated block.
    pub repeatable_questions: HashSet<String>,
    /// Fields that never appear in the general section.
    pub excluded_fields: HashSet<String>,
    /// The answer shown for unanswered trailing questions.
    pub placeholder: String,
}

impl SectionConfig {
    /// The full set of base names kept out of the general section: the excluded
    /// fields and every field that is rendered in another section.
    pub fn exclusions(&self) -> HashSet<String> {
        let mut res: HashSet<String> = self.excluded_fields.clone();
        res.extend(self.trailing_questions.iter().map(|q| q.trim().to_string()));
        res.extend(self.repeatable_questions.iter().cloned());
        res.insert(self.separator.clone());
        res
    }

    pub fn is_trailing(&self, base: &str) -> bool {
        self.trailing_questions.iter().any(|q| q.trim() == base)
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        SectionConfig {
            trailing_questions: DATA_QUALITY_QUESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            separator: FILE_SECTION_SEPARATOR.to_string(),
            repeatable_questions: FILE_QUESTIONS.iter().map(|s| s.to_string()).collect(),
            excluded_fields: SYSTEM_FIELDS.iter().map(|s| s.to_string()).collect(),
            placeholder: NO_RESPONSE_PLACEHOLDER.to_string(),
        }
    }
}
