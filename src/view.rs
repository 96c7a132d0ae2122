//! What the user currently asked to see

use std::fmt::{Display, Formatter};
use std::str::FromStr;


/// How the list of activities is ordered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical order of the activity names
    Name,
    /// Alphabetical order of the schedule strings
    Schedule,
    /// Most open spots first
    Availability,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Name
    }
}

impl SortKey {
    /// The value used for this key in the sort control
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Schedule => "schedule",
            SortKey::Availability => "availability",
        }
    }

    /// Parses a sort control value, falling back to sorting by name for unknown values
    pub fn from_control_value(value: &str) -> Self {
        match value.parse() {
            Ok(key) => key,
            Err(err) => {
                log::warn!("{}. Sorting by name instead", err);
                SortKey::Name
            },
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "schedule" => Ok(SortKey::Schedule),
            "availability" => Ok(SortKey::Availability),
            other => Err(format!("Unknown sort key {:?}", other)),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}



/// The search, category and sort settings that drive the list of activities.
///
/// This is never sent to the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    search: String,
    category: Option<String>,
    sort: SortKey,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The search text, as typed
    pub fn search(&self) -> &str { &self.search }
    pub fn category(&self) -> Option<&str> { self.category.as_deref() }
    pub fn sort(&self) -> SortKey { self.sort }

    pub fn set_search<S: ToString>(&mut self, search: S) {
        self.search = search.to_string();
    }

    /// Selects a category. An empty value clears the category filter
    pub fn set_category(&mut self, category: &str) {
        self.category = match category {
            "" => None,
            c => Some(c.to_string()),
        };
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn with_search<S: ToString>(mut self, search: S) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    /// The search text the way queries compare it: trimmed and lower-cased
    pub fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }
}
