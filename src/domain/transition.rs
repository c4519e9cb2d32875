use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Substring that marks a transition as the default approval move.
pub const PREFERRED_KEYWORD: &str = "approved";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

impl Transition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Transitions legal for one issue at the moment they were listed.
///
/// Keeps the tracker's ordering for numbered selection and a lower-cased name
/// index for resolving a transition by name. Build a fresh catalog after any
/// state change; never carry one across calls.
#[derive(Debug, Clone, Default)]
pub struct TransitionCatalog {
    ordered: Vec<Transition>,
    by_name: HashMap<String, usize>,
}

impl TransitionCatalog {
    pub fn new(transitions: Vec<Transition>) -> Self {
        let mut by_name = HashMap::with_capacity(transitions.len());
        for (index, transition) in transitions.iter().enumerate() {
            by_name
                .entry(transition.name.to_lowercase())
                .or_insert(index);
        }
        Self {
            ordered: transitions,
            by_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.ordered.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.ordered.iter().map(|t| t.name.as_str()).collect()
    }

    /// Case-insensitive exact match on the transition name.
    pub fn resolve(&self, name: &str) -> Option<&Transition> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| &self.ordered[index])
    }

    /// First transition, in catalog order, whose name contains "approved".
    pub fn preferred(&self) -> Option<&Transition> {
        self.ordered
            .iter()
            .find(|t| t.name.to_lowercase().contains(PREFERRED_KEYWORD))
    }

    /// Interprets a manual choice: blank skips, otherwise a 1-based index.
    pub fn select(&self, choice: &str) -> AppResult<Option<&Transition>> {
        let choice = choice.trim();
        if choice.is_empty() {
            return Ok(None);
        }
        let number: usize = choice
            .parse()
            .map_err(|_| AppError::InvalidInput("Please enter a valid number".to_string()))?;
        if number == 0 || number > self.len() {
            return Err(AppError::InvalidInput(format!(
                "Invalid choice {number}; pick 1-{}",
                self.len()
            )));
        }
        Ok(Some(&self.ordered[number - 1]))
    }
}
