use serde::{Deserialize, Serialize};
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("prompt title cannot be empty")]
    EmptyTitle,
}

/// Why a list of stored prompts cannot become a collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("title {title:?} is empty or has surrounding whitespace")]
    UnnormalizedTitle { title: String },
    #[error("duplicate title {title:?}")]
    DuplicateTitle { title: String },
}

/// A titled piece of reusable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl Prompt {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            created_at: None,
            modified_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Ordered prompt list keyed by unique title.
///
/// Insertion order is display order; updates never move an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptCollection {
    prompts: Vec<Prompt>,
}

impl PromptCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from stored prompts.
    ///
    /// Every title must already be in the form `normalize_title` produces,
    /// otherwise the window could never address it, and titles must be
    /// unique.
    pub fn from_prompts(prompts: Vec<Prompt>) -> Result<Self, CollectionError> {
        for (index, prompt) in prompts.iter().enumerate() {
            if normalize_title(&prompt.title) != Ok(prompt.title.as_str()) {
                return Err(CollectionError::UnnormalizedTitle {
                    title: prompt.title.clone(),
                });
            }
            if prompts[..index]
                .iter()
                .any(|earlier| earlier.title == prompt.title)
            {
                return Err(CollectionError::DuplicateTitle {
                    title: prompt.title.clone(),
                });
            }
        }
        Ok(Self { prompts })
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|prompt| prompt.title == title)
    }

    pub fn upsert(&mut self, title: &str, content: &str) -> UpsertOutcome {
        self.upsert_at(title, content, current_timestamp())
    }

    pub fn upsert_at(&mut self, title: &str, content: &str, timestamp: String) -> UpsertOutcome {
        if let Some(existing) = self
            .prompts
            .iter_mut()
            .find(|prompt| prompt.title == title)
        {
            existing.content = content.to_string();
            existing.modified_at = Some(timestamp);
            return UpsertOutcome::Updated;
        }

        self.prompts.push(Prompt {
            title: title.to_string(),
            content: content.to_string(),
            created_at: Some(timestamp.clone()),
            modified_at: Some(timestamp),
        });
        UpsertOutcome::Created
    }

    pub fn delete(&mut self, title: &str) -> bool {
        let Some(index) = self.prompts.iter().position(|prompt| prompt.title == title) else {
            return false;
        };
        self.prompts.remove(index);
        true
    }

    pub fn all(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn titles(&self) -> Vec<String> {
        self.prompts
            .iter()
            .map(|prompt| prompt.title.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

pub fn normalize_title(raw: &str) -> Result<&str, PromptError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(PromptError::EmptyTitle);
    }
    Ok(title)
}

pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> String {
        "2024-05-01 09:30:00".to_string()
    }

    #[test]
    fn upsert_new_title_appends_at_end() {
        let mut collection = PromptCollection::new();
        collection.upsert("Alpha", "a");
        let outcome = collection.upsert("Beta", "b");

        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(collection.titles(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn upsert_existing_title_updates_in_place_without_reordering() {
        let mut collection = PromptCollection::new();
        collection.upsert_at("Alpha", "a", stamp());
        collection.upsert_at("Beta", "b", stamp());
        collection.upsert_at("Gamma", "c", stamp());

        let outcome = collection.upsert_at("Beta", "changed", "2024-06-01 10:00:00".to_string());

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.titles(), vec!["Alpha", "Beta", "Gamma"]);
        let beta = collection.find_by_title("Beta").expect("beta present");
        assert_eq!(beta.content, "changed");
        assert_eq!(beta.created_at.as_deref(), Some("2024-05-01 09:30:00"));
        assert_eq!(beta.modified_at.as_deref(), Some("2024-06-01 10:00:00"));
    }

    #[test]
    fn find_by_title_is_case_sensitive() {
        let mut collection = PromptCollection::new();
        collection.upsert("Greeting", "Hi there");

        assert!(collection.find_by_title("Greeting").is_some());
        assert!(collection.find_by_title("greeting").is_none());
    }

    #[test]
    fn delete_present_title_keeps_relative_order() {
        let mut collection = PromptCollection::new();
        for title in ["a", "b", "c", "d"] {
            collection.upsert_at(title, title, stamp());
        }

        assert!(collection.delete("b"));
        assert_eq!(collection.titles(), vec!["a", "c", "d"]);
    }

    #[test]
    fn delete_absent_title_reports_not_found_and_leaves_collection_unchanged() {
        let mut collection = PromptCollection::new();
        collection.upsert_at("a", "1", stamp());
        let before = collection.clone();

        assert!(!collection.delete("missing"));
        assert_eq!(collection, before);
    }

    #[test]
    fn empty_content_is_allowed() {
        let mut collection = PromptCollection::new();
        collection.upsert("Blank", "");
        assert_eq!(collection.find_by_title("Blank").map(|p| p.content.as_str()), Some(""));
    }

    #[test]
    fn normalize_title_trims_and_rejects_blank_input() {
        assert_eq!(normalize_title("  Greeting \n"), Ok("Greeting"));
        assert_eq!(normalize_title(""), Err(PromptError::EmptyTitle));
        assert_eq!(normalize_title("   \t"), Err(PromptError::EmptyTitle));
    }

    #[test]
    fn from_prompts_rejects_duplicate_titles() {
        let result = PromptCollection::from_prompts(vec![
            Prompt::new("Same", "1"),
            Prompt::new("Other", "2"),
            Prompt::new("Same", "3"),
        ]);
        assert_eq!(
            result,
            Err(CollectionError::DuplicateTitle {
                title: "Same".to_string()
            })
        );
    }

    #[test]
    fn from_prompts_rejects_titles_the_window_cannot_address() {
        for title in ["", "   ", " Greeting", "Greeting\n"] {
            let result = PromptCollection::from_prompts(vec![Prompt::new(title, "x")]);
            assert_eq!(
                result,
                Err(CollectionError::UnnormalizedTitle {
                    title: title.to_string()
                }),
                "title {title:?}"
            );
        }
    }

    #[test]
    fn legacy_entries_without_timestamps_deserialize() {
        let prompt: Prompt =
            serde_json::from_str(r#"{"title":"Old","content":"text"}"#).expect("parse");
        assert_eq!(prompt, Prompt::new("Old", "text"));

        let serialized = serde_json::to_string(&prompt).expect("serialize");
        assert_eq!(serialized, r#"{"title":"Old","content":"text"}"#);
    }
}
