//! Activities, as served by the signup server

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;


/// An extra-curricular activity, as described by the server
///
/// Missing or `null` fields in a server payload fall back to their default value (empty strings, zero capacity, no participants)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    #[serde(deserialize_with = "null_as_default")]
    schedule: String,
    #[serde(deserialize_with = "null_as_default")]
    max_participants: i64,
    /// Emails of the enrolled students, in enrollment order
    #[serde(deserialize_with = "null_as_default")]
    participants: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Activity {
    pub fn new<S: ToString, T: ToString>(description: S, schedule: T, max_participants: i64, participants: Vec<String>) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants,
        }
    }

    pub fn description(&self) -> &str { &self.description }
    pub fn schedule(&self) -> &str { &self.schedule }
    pub fn max_participants(&self) -> i64 { self.max_participants }
    pub fn participants(&self) -> &[String] { &self.participants }

    /// How many students can still sign up.
    ///
    /// This is not clamped: an over-booked activity has a negative count
    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.participants.len() as i64
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    pub fn add_participant(&mut self, email: String) {
        self.participants.push(email);
    }

    /// Removes a participant. Returns whether it was enrolled
    pub fn remove_participant(&mut self, email: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != email);
        before != self.participants.len()
    }
}



/// Every activity known by the server, keyed by their (unique) names
///
/// The order of the server payload is kept, because it is the order the activities are offered in the signup form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityCollection {
    entries: Vec<(String, Activity)>,
}

impl ActivityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an activity at the end of the collection, or replaces an existing one with the same name (keeping its position)
    pub fn insert(&mut self, name: String, activity: Activity) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries.iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.entries.iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activity names, in server order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

impl std::iter::FromIterator<(String, Activity)> for ActivityCollection {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (name, activity) in iter {
            collection.insert(name, activity);
        }
        collection
    }
}

impl Serialize for ActivityCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, activity) in &self.entries {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = ActivityCollection;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map of activity names to activities")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut collection = ActivityCollection::new();
        while let Some((name, activity)) = access.next_entry::<String, Activity>()? {
            collection.insert(name, activity);
        }
        Ok(collection)
    }
}

impl<'de> Deserialize<'de> for ActivityCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_order_is_kept() {
        let json = r#"{
            "Programming Class": {"description": "p", "schedule": "Tue", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "c", "schedule": "Fri", "max_participants": 12, "participants": ["michael@mergington.edu"]},
            "Art Club": {"description": "a", "schedule": "Wed", "max_participants": 15, "participants": []}
        }"#;
        let collection: ActivityCollection = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = collection.names().collect();
        assert_eq!(names, vec!["Programming Class", "Chess Club", "Art Club"]);
        assert_eq!(collection.get("Chess Club").unwrap().spots_left(), 11);
    }

    #[test]
    fn missing_fields_default() {
        let json = r#"{ "Ghost Club": {} }"#;
        let collection: ActivityCollection = serde_json::from_str(json).unwrap();
        let ghost = collection.get("Ghost Club").unwrap();
        assert_eq!(ghost.description(), "");
        assert_eq!(ghost.schedule(), "");
        assert_eq!(ghost.spots_left(), 0);
    }

    #[test]
    fn null_fields_default() {
        let json = r#"{
            "Chess Club": {"description": null, "schedule": null, "max_participants": 12, "participants": ["a@x.com"]},
            "Ghost Club": {"description": "g", "schedule": "Mon", "max_participants": null, "participants": null}
        }"#;
        let collection: ActivityCollection = serde_json::from_str(json).unwrap();

        let chess = collection.get("Chess Club").unwrap();
        assert_eq!(chess.description(), "");
        assert_eq!(chess.schedule(), "");
        assert_eq!(chess.spots_left(), 11);

        let ghost = collection.get("Ghost Club").unwrap();
        assert_eq!(ghost.max_participants(), 0);
        assert!(ghost.participants().is_empty());
    }

    #[test]
    fn spots_left_is_not_clamped() {
        let crowded = Activity::new("d", "s", 1, vec!["a@x.com".into(), "b@x.com".into()]);
        assert_eq!(crowded.spots_left(), -1);
    }

    #[test]
    fn duplicate_names_keep_first_position() {
        let json = r#"{ "A": {"schedule": "1"}, "B": {}, "A": {"schedule": "2"} }"#;
        let collection: ActivityCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(collection.get("A").unwrap().schedule(), "2");
    }

    #[test]
    fn participants_can_be_removed() {
        let mut chess = Activity::new("d", "s", 10, vec!["a@x.com".into()]);
        assert!(chess.remove_participant("a@x.com"));
        assert!(chess.remove_participant("a@x.com") == false);
        assert_eq!(chess.spots_left(), 10);
    }
}
