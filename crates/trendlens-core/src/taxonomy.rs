use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A named trend topic and the keywords that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendTopic {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered trend taxonomy used to tag records with topic names.
///
/// Topic order is significant: matches are reported in the order the topics
/// are declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub topics: Vec<TrendTopic>,
    /// Terms that make a caption unsuitable for brand partnerships.
    #[serde(default)]
    pub unsafe_terms: Vec<String>,
}

impl Taxonomy {
    /// Returns the names of every topic with at least one keyword occurring
    /// in `text` (case-insensitive substring match).
    #[must_use]
    pub fn matches(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.topics
            .iter()
            .filter(|topic| topic.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|topic| topic.name.clone())
            .collect()
    }

    /// `false` when `text` contains any configured unsafe term.
    #[must_use]
    pub fn is_brand_safe(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        !self
            .unsafe_terms
            .iter()
            .any(|term| lower.contains(term.as_str()))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        let topic = |name: &str, keywords: &[&str]| TrendTopic {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        };

        Self {
            topics: vec![
                topic("dance", &["dance", "choreo", "dancechallenge"]),
                topic("comedy", &["funny", "comedy", "prank", "meme", "standup"]),
                topic("fashion", &["fashion", "outfit", "ootd", "style"]),
                topic("beauty", &["makeup", "skincare", "beauty", "grwm"]),
                topic("food", &["recipe", "food", "cooking", "foodie"]),
                topic("fitness", &["workout", "fitness", "gym"]),
                topic("tech", &["tech", "gadget", "coding", "#ai"]),
                topic("travel", &["travel", "wanderlust", "vacation"]),
                topic("music", &["music", "song", "cover", "remix"]),
                topic("gaming", &["gaming", "gamer", "gameplay"]),
                topic("pets", &["dog", "cat", "puppy", "kitten", "pets"]),
            ],
            unsafe_terms: ["nsfw", "explicit", "gore", "violence", "hate"]
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
        }
    }
}

/// Load and validate a trend taxonomy from a YAML file.
///
/// Keywords and unsafe terms are lowercased after loading so matching can be
/// done against lowercased text.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_taxonomy(&content)
}

/// Parse and validate taxonomy YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_taxonomy(yaml: &str) -> Result<Taxonomy, ConfigError> {
    let mut taxonomy: Taxonomy = serde_yaml::from_str(yaml)?;

    for topic in &mut taxonomy.topics {
        topic.name = topic.name.trim().to_string();
        topic.keywords = topic
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
    }
    taxonomy.unsafe_terms = taxonomy
        .unsafe_terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    validate_taxonomy(&taxonomy)?;

    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &Taxonomy) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for topic in &taxonomy.topics {
        if topic.name.is_empty() {
            return Err(ConfigError::Validation(
                "topic name must be non-empty".to_string(),
            ));
        }

        if topic.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "topic '{}' has no keywords",
                topic.name
            )));
        }

        if !seen_names.insert(topic.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate topic name: '{}'",
                topic.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
