use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::RagChatError;

/// The content tables this client can browse and search.
///
/// Both tables share the id/version/content/embedding shape and are filled by
/// an external ingestion process; rows are read-only here. Table names are
/// never interpolated from free-form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ContentTable {
    /// Curated code examples
    CodeExamples,
    /// Airflow documentation/code embeddings
    AirflowEmbeddings,
}

impl ContentTable {
    /// The SQL identifier of the table
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::CodeExamples => "code_examples",
            Self::AirflowEmbeddings => "airflow_code_embeddings",
        }
    }

    /// Rows in the embeddings table often have no name; listing falls back to
    /// a content prefix for those.
    pub const fn name_falls_back_to_content(self) -> bool {
        matches!(self, Self::AirflowEmbeddings)
    }

    pub fn parse(name: &str) -> crate::Result<Self> {
        match name {
            "code_examples" => Ok(Self::CodeExamples),
            "airflow_code_embeddings" => Ok(Self::AirflowEmbeddings),
            other => Err(RagChatError::UnknownTable(other.to_string())),
        }
    }
}

impl std::fmt::Display for ContentTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Full content row, including the stored embedding when one exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub runtime_versions: Option<String>,
    pub name: Option<String>,
    pub file_path: Option<String>,
    pub content: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Display name: the row's name, or a content prefix when unnamed
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.content
            .as_deref()
            .map(|c| c.chars().take(50).collect())
            .unwrap_or_else(|| format!("item {}", self.id))
    }
}

/// Summarized row for list views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentListItem {
    pub id: i64,
    pub name: Option<String>,
    pub version: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Parse a stored embedding from its text form, `[f1,f2,...]`.
///
/// pgvector renders vectors this way, and rows ingested by older tooling may
/// carry arbitrary junk, so anything that doesn't parse cleanly yields None
/// instead of failing the row.
pub fn parse_vector_text(text: &str) -> Option<Vec<f32>> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    inner
        .split(',')
        .map(|part| part.trim().parse::<f32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(ContentTable::CodeExamples.table_name(), "code_examples");
        assert_eq!(
            ContentTable::AirflowEmbeddings.table_name(),
            "airflow_code_embeddings"
        );
    }

    #[test]
    fn test_table_parse_roundtrip() {
        for table in [ContentTable::CodeExamples, ContentTable::AirflowEmbeddings] {
            assert_eq!(ContentTable::parse(table.table_name()).unwrap(), table);
        }
    }

    #[test]
    fn test_table_parse_unknown() {
        let err = ContentTable::parse("users; DROP TABLE users").unwrap_err();
        assert!(matches!(err, RagChatError::UnknownTable(_)));
    }

    #[test]
    fn test_parse_vector_text_valid() {
        assert_eq!(
            parse_vector_text("[1.0, -2.5, 3]"),
            Some(vec![1.0, -2.5, 3.0])
        );
        assert_eq!(parse_vector_text(" [0.25,0.75] "), Some(vec![0.25, 0.75]));
    }

    #[test]
    fn test_parse_vector_text_empty() {
        assert_eq!(parse_vector_text("[]"), Some(Vec::new()));
    }

    #[test]
    fn test_parse_vector_text_malformed() {
        assert_eq!(parse_vector_text("1.0,2.0"), None);
        assert_eq!(parse_vector_text("[1.0,oops]"), None);
        assert_eq!(parse_vector_text("not a vector"), None);
        assert_eq!(parse_vector_text(""), None);
    }

    #[test]
    fn test_display_name_fallback() {
        let item = ContentItem {
            id: 7,
            version: None,
            release_date: None,
            runtime_versions: None,
            name: None,
            file_path: None,
            content: Some("x".repeat(80)),
            embedding: None,
            created_at: None,
        };
        assert_eq!(item.display_name().chars().count(), 50);

        let unnamed = ContentItem {
            content: None,
            ..item
        };
        assert_eq!(unnamed.display_name(), "item 7");
    }
}
