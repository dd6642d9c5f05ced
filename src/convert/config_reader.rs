/*!
The optional configuration file.

It is a JSON document. All the keys are optional; the defaults describe the
Survey123 metadata survey.

```json
{
  "sections": {
    "trailingQuestions": ["What were the goals during the collection of the original data?"],
    "separator": "Do you have additional files to add?",
    "repeatableQuestions": ["Please provide a title that clearly describes your file."],
    "excludedFields": ["ObjectID", "GlobalID"],
    "placeholder": "No response provided."
  },
  "document": {
    "titleFields": [{ "field": "Title", "showLabel": false }],
    "metadataFields": ["Metadata Owner", "Data Pillar"],
    "outputDirectory": "out_pdfs",
    "fontDirectory": "fonts"
  }
}
```
*/
use log::debug;
use std::collections::HashSet;
use std::fs;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use survey_sections::SectionConfig;

use crate::convert::document::{DocumentSettings, TitleField};
use crate::convert::*;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionsSettings {
    #[serde(rename = "trailingQuestions")]
    pub trailing_questions: Option<Vec<String>>,
    pub separator: Option<String>,
    #[serde(rename = "repeatableQuestions")]
    pub repeatable_questions: Option<Vec<String>>,
    #[serde(rename = "excludedFields")]
    pub excluded_fields: Option<Vec<String>>,
    pub placeholder: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TitleFieldSettings {
    pub field: String,
    #[serde(rename = "showLabel")]
    pub show_label: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFileSettings {
    #[serde(rename = "titleFields")]
    pub title_fields: Option<Vec<TitleFieldSettings>>,
    #[serde(rename = "metadataFields")]
    pub metadata_fields: Option<Vec<String>>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "fontDirectory")]
    pub font_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub sections: Option<SectionsSettings>,
    pub document: Option<DocumentFileSettings>,
}

/// The validated settings of a conversion.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Settings {
    pub sections: SectionConfig,
    pub document: DocumentSettings,
    pub output_directory: Option<String>,
    pub font_directory: Option<String>,
}

pub fn read_settings(path: &str) -> ConvertResult<Settings> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: ConverterConfig =
        serde_json::from_str(&contents).context(ParsingConfigSnafu { path })?;
    debug!("read_settings: {:?}", config);
    validate_config(&config)
}

pub fn validate_config(config: &ConverterConfig) -> ConvertResult<Settings> {
    let sections = validate_sections(&config.sections.clone().unwrap_or_default())?;
    let doc_settings = config.document.clone().unwrap_or_default();
    let document = validate_document(&doc_settings)?;
    Ok(Settings {
        sections,
        document,
        output_directory: doc_settings.output_directory,
        font_directory: doc_settings.font_directory,
    })
}

fn trimmed(xs: &[String]) -> Vec<String> {
    xs.iter().map(|s| s.trim().to_string()).collect()
}

fn validate_sections(s: &SectionsSettings) -> ConvertResult<SectionConfig> {
    let defaults = SectionConfig::default();
    let res = SectionConfig {
        trailing_questions: match &s.trailing_questions {
            Some(qs) => trimmed(qs),
            None => defaults.trailing_questions,
        },
        separator: match &s.separator {
            Some(sep) => sep.trim().to_string(),
            None => defaults.separator,
        },
        repeatable_questions: match &s.repeatable_questions {
            Some(qs) => trimmed(qs).into_iter().collect(),
            None => defaults.repeatable_questions,
        },
        excluded_fields: match &s.excluded_fields {
            Some(fields) => trimmed(fields).into_iter().collect(),
            None => defaults.excluded_fields,
        },
        placeholder: s.placeholder.clone().unwrap_or(defaults.placeholder),
    };

    if res.separator.is_empty() {
        whatever!("The separator question cannot be empty")
    }
    if res.trailing_questions.iter().any(|q| q.is_empty())
        || res.repeatable_questions.iter().any(|q| q.is_empty())
    {
        whatever!("Questions cannot be empty")
    }
    if res.placeholder.trim().is_empty() {
        whatever!("The placeholder answer cannot be empty")
    }
    if res.repeatable_questions.contains(&res.separator) {
        whatever!(
            "The separator {:?} cannot also be a repeatable question",
            res.separator
        )
    }
    let trailing: HashSet<&String> = res.trailing_questions.iter().collect();
    if let Some(q) = res.repeatable_questions.iter().find(|q| trailing.contains(q)) {
        whatever!(
            "Question {:?} cannot be both a repeatable and a trailing question",
            q
        )
    }
    Ok(res)
}

fn validate_document(d: &DocumentFileSettings) -> ConvertResult<DocumentSettings> {
    let defaults = DocumentSettings::default();
    let title_fields: Vec<TitleField> = match &d.title_fields {
        Some(tfs) => tfs
            .iter()
            .map(|tf| TitleField {
                field: tf.field.trim().to_string(),
                show_label: tf.show_label.unwrap_or(false),
            })
            .collect(),
        None => defaults.title_fields,
    };
    if title_fields.iter().any(|tf| tf.field.is_empty()) {
        whatever!("Title fields cannot be empty")
    }
    Ok(DocumentSettings {
        title_fields,
        metadata_fields: match &d.metadata_fields {
            Some(fields) => trimmed(fields),
            None => defaults.metadata_fields,
        },
    })
}
