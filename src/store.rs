//! This module provides the local copy of the activities, and the queries the activity list is built from

use std::cmp::Ordering;

use crate::activity::{Activity, ActivityCollection};
use crate::category::CategoryIndex;
use crate::utils::comparison::{compare_alpha, contains_ignore_case};
use crate::view::{SortKey, ViewState};


/// The activities from the last successful fetch
///
/// Queries borrow the store, so that any computed view is dropped before the store can be re-loaded.
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: ActivityCollection,
    categories: CategoryIndex,
}

impl ActivityStore {
    /// Create an empty store that classifies activities using `categories`
    pub fn new(categories: CategoryIndex) -> Self {
        Self {
            activities: ActivityCollection::new(),
            categories,
        }
    }

    /// Replaces every stored activity with the content of `collection`
    pub fn load(&mut self, collection: ActivityCollection) {
        log::debug!("Loading {} activities", collection.len());
        self.activities = collection;
    }

    pub fn activities(&self) -> &ActivityCollection {
        &self.activities
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.get(name)
    }

    /// Returns the activities that match `view`, in the order they should be displayed
    pub fn query<'a>(&'a self, view: &ViewState) -> Vec<(&'a str, &'a Activity)> {
        let search = view.normalized_search();
        let category = view.category();

        let mut entries: Vec<(&str, &Activity)> = self.activities.iter()
            .filter(|(name, activity)| matches_search(name, activity, &search))
            .filter(|(name, _)| match category {
                None => true,
                Some(category) => self.categories.is_in(name, category),
            })
            .collect();

        // `sort_by` is stable: ties stay in server order
        let sort = view.sort();
        entries.sort_by(|left, right| compare_entries(sort, left, right));
        entries
    }
}

fn matches_search(name: &str, activity: &Activity, lowercase_search: &str) -> bool {
    if lowercase_search.is_empty() {
        return true;
    }
    contains_ignore_case(name, lowercase_search)
        || contains_ignore_case(activity.description(), lowercase_search)
}

fn compare_entries(sort: SortKey, left: &(&str, &Activity), right: &(&str, &Activity)) -> Ordering {
    match sort {
        SortKey::Name => compare_alpha(left.0, right.0),
        SortKey::Schedule => compare_alpha(left.1.schedule(), right.1.schedule()),
        SortKey::Availability => Ord::cmp(&right.1.spots_left(), &left.1.spots_left()),
    }
}
