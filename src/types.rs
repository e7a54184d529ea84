//! Core data types shared by the search client, executor and UI
//!
//! Candidates are created in bulk by one search and never mutated afterwards.

use serde::{Deserialize, Serialize};
use strum::Display;

/// One installable package surfaced by a registry search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Canonical import path, passed verbatim to the install command
    pub identifier: String,
    /// Relevance signal ("imported by" count); empty when unknown
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub popularity: String,
    /// Parent module when this entry was promoted from a snippet's sub-line
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_identifier: String,
}

/// Registry order is display order; nothing downstream re-sorts it.
pub type ResultSet = Vec<Candidate>;

impl Candidate {
    /// A candidate with only an identifier, as used by the no-match fallback.
    pub fn bare(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_popularity(identifier: impl Into<String>, popularity: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            popularity: popularity.into(),
            parent_identifier: String::new(),
        }
    }

    /// Sub-member of `parent`, inheriting its popularity.
    pub fn child_of(parent: &Candidate, identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            popularity: parent.popularity.clone(),
            parent_identifier: parent.identifier.clone(),
        }
    }

    pub fn is_child(&self) -> bool {
        !self.parent_identifier.is_empty()
    }

    /// List label for the zero-based `index`.
    ///
    /// Children are annotated with their parent instead of popularity.
    pub fn label(&self, index: usize) -> String {
        let number = index + 1;
        if self.is_child() {
            format!("{}. {} (from {})", number, self.identifier, self.parent_identifier)
        } else if self.popularity.is_empty() {
            format!("{}. {}", number, self.identifier)
        } else {
            format!("{}. {} ({})", number, self.identifier, self.popularity)
        }
    }
}

/// Progress markers posted around a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchStatus {
    Started,
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_with_popularity() {
        let c = Candidate::with_popularity("github.com/pkg/errors", "12,345");
        assert_eq!(c.label(0), "1. github.com/pkg/errors (12,345)");
    }

    #[test]
    fn test_label_without_popularity() {
        assert_eq!(Candidate::bare("left-pad").label(4), "5. left-pad");
    }

    #[test]
    fn test_label_for_child_prefers_parent() {
        let parent = Candidate::with_popularity("golang.org/x/text", "900");
        let child = Candidate::child_of(&parent, "golang.org/x/text/encoding");
        assert_eq!(child.popularity, "900");
        assert_eq!(child.label(1), "2. golang.org/x/text/encoding (from golang.org/x/text)");
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_string(&Candidate::bare("leftpad")).unwrap();
        assert_eq!(json, r#"{"identifier":"leftpad"}"#);
    }
}
