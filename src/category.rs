//! Client-side classification of activities
//!
//! The server does not know about categories. They are only used to filter the list of activities.

use std::collections::{BTreeSet, HashMap};


/// Maps activity names to a category label
///
/// Activities that are not part of the index have no category, and are never kept by a category filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryIndex {
    categories: HashMap<String, String>,
}

impl CategoryIndex {
    /// An index with no category at all
    pub fn new() -> Self {
        Self::default()
    }

    /// The categories of the activities offered by the school
    pub fn school_defaults() -> Self {
        [
            ("Chess Club", "Academic"),
            ("Programming Class", "Academic"),
            ("Math Club", "Academic"),
            ("Debate Team", "Academic"),
            ("Gym Class", "Sports"),
            ("Soccer Team", "Sports"),
            ("Basketball Team", "Sports"),
            ("Art Club", "Arts"),
            ("Drama Club", "Arts"),
        ].iter()
        .map(|(name, category)| (name.to_string(), category.to_string()))
        .collect()
    }

    pub fn set<S: ToString, T: ToString>(&mut self, activity_name: S, category: T) {
        self.categories.insert(activity_name.to_string(), category.to_string());
    }

    pub fn category_of(&self, activity_name: &str) -> Option<&str> {
        self.categories.get(activity_name).map(|c| c.as_str())
    }

    /// Whether the activity is classified under `category`
    pub fn is_in(&self, activity_name: &str, category: &str) -> bool {
        self.category_of(activity_name) == Some(category)
    }

    /// Every distinct category label, sorted
    pub fn labels(&self) -> Vec<&str> {
        let labels: BTreeSet<&str> = self.categories.values().map(|c| c.as_str()).collect();
        labels.into_iter().collect()
    }
}

impl std::iter::FromIterator<(String, String)> for CategoryIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<String, String>> for CategoryIndex {
    fn from(categories: HashMap<String, String>) -> Self {
        Self { categories }
    }
}
