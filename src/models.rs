//! Core data models shared between the API client, the local store, and the
//! CLI commands.
//!
//! `Word` is the full thesaurus record the backend returns; the local store
//! treats it as an opaque payload and never inspects individual fields.

use serde::{Deserialize, Serialize};

/// A full thesaurus word record: definitions, parts of speech, and the five
/// relation lists (WordNet-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    /// Parts of speech, e.g. `["noun", "verb"]`.
    #[serde(default)]
    pub pos: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    /// Hypernyms.
    #[serde(default)]
    pub broader_terms: Vec<String>,
    /// Hyponyms.
    #[serde(default)]
    pub narrower_terms: Vec<String>,
    #[serde(default)]
    pub related_terms: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// One page of search hits from `/api/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<Word>,
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

/// Optional search refinements.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Restrict hits to one part of speech.
    pub pos: Option<String>,
    /// Match the query as a whole word rather than a prefix.
    pub exact_match: bool,
}

/// The five relation kinds the backend exposes per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    Synonym,
    Antonym,
    BroaderTerm,
    NarrowerTerm,
    RelatedTerm,
}

impl RelationType {
    /// Parse a CLI-facing name. Accepts the plural forms the API uses.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "synonyms" => Some(RelationType::Synonym),
            "antonyms" => Some(RelationType::Antonym),
            "broader" => Some(RelationType::BroaderTerm),
            "narrower" => Some(RelationType::NarrowerTerm),
            "related" => Some(RelationType::RelatedTerm),
            _ => None,
        }
    }

    /// URL path segment under `/api/` for this relation.
    pub fn endpoint(&self) -> &'static str {
        match self {
            RelationType::Synonym => "synonyms",
            RelationType::Antonym => "antonyms",
            RelationType::BroaderTerm => "broader",
            RelationType::NarrowerTerm => "narrower",
            RelationType::RelatedTerm => "related",
        }
    }

    /// Human-readable heading for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            RelationType::Synonym => "Synonyms",
            RelationType::Antonym => "Antonyms",
            RelationType::BroaderTerm => "Broader terms",
            RelationType::NarrowerTerm => "Narrower terms",
            RelationType::RelatedTerm => "Related terms",
        }
    }

    pub fn all() -> [RelationType; 5] {
        [
            RelationType::Synonym,
            RelationType::Antonym,
            RelationType::BroaderTerm,
            RelationType::NarrowerTerm,
            RelationType::RelatedTerm,
        ]
    }

    /// Pick the relation list out of a full word record.
    pub fn terms_of<'a>(&self, word: &'a Word) -> &'a [String] {
        match self {
            RelationType::Synonym => &word.synonyms,
            RelationType::Antonym => &word.antonyms,
            RelationType::BroaderTerm => &word.broader_terms,
            RelationType::NarrowerTerm => &word.narrower_terms,
            RelationType::RelatedTerm => &word.related_terms,
        }
    }
}

/// Account profile as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_parse_accepts_api_names() {
        assert_eq!(RelationType::parse("synonyms"), Some(RelationType::Synonym));
        assert_eq!(
            RelationType::parse("broader"),
            Some(RelationType::BroaderTerm)
        );
        assert_eq!(RelationType::parse("hypernyms"), None);
    }

    #[test]
    fn relation_endpoint_round_trips_through_parse() {
        for rel in RelationType::all() {
            assert_eq!(RelationType::parse(rel.endpoint()), Some(rel));
        }
    }

    #[test]
    fn word_deserializes_with_missing_relation_lists() {
        let json = r#"{"id":"w1","word":"happy"}"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.word, "happy");
        assert!(word.synonyms.is_empty());
        assert!(word.examples.is_empty());
    }
}
