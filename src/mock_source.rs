//! An in-memory activity source, that behaves like the signup server
#![cfg(feature = "local_mocks")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::activity::{Activity, ActivityCollection};
use crate::error::SourceError;
use crate::mock_behaviour::MockBehaviour;
use crate::traits::{ActivitySource, MutationReply};
use crate::utils::lock;


/// A request received by a [`MockSource`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockRequest {
    GetActivities,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}

/// An activity source that keeps its activities in memory, and answers like the signup server does
///
/// Its requests can be made to fail with a [`MockBehaviour`]
#[derive(Debug, Default)]
pub struct MockSource {
    activities: Mutex<ActivityCollection>,
    requests: Mutex<Vec<MockRequest>>,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
    latency: Option<Duration>,
}

impl MockSource {
    pub fn new(activities: ActivityCollection) -> Self {
        Self {
            activities: Mutex::new(activities),
            requests: Mutex::new(Vec::new()),
            mock_behaviour: None,
            latency: None,
        }
    }

    /// A source with the activities of a typical school
    pub fn school() -> Self {
        Self::new(school_activities())
    }

    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// Make every request take `latency` before it is answered
    pub fn set_latency(&mut self, latency: Duration) {
        self.latency = Some(latency);
    }

    /// A copy of the activities, as the server currently knows them
    pub fn activities(&self) -> ActivityCollection {
        lock(&self.activities).clone()
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<MockRequest> {
        lock(&self.requests).clone()
    }

    /// How many times the activities have been fetched
    pub fn fetch_count(&self) -> usize {
        lock(&self.requests).iter()
            .filter(|r| **r == MockRequest::GetActivities)
            .count()
    }

    /// Record a request, then wait until it should be answered
    async fn receive(&self, request: MockRequest) {
        lock(&self.requests).push(request);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), SourceError>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), SourceError>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = lock(behaviour);
                check(&mut *behaviour)
            },
        }
    }
}

fn rejected(status: u16, detail: &str) -> SourceError {
    SourceError::Rejected { status, detail: Some(detail.to_string()) }
}

#[async_trait]
impl ActivitySource for MockSource {
    async fn get_activities(&self) -> Result<ActivityCollection, SourceError> {
        self.receive(MockRequest::GetActivities).await;
        self.check_behaviour(|b| b.can_get_activities())?;
        Ok(self.activities())
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError> {
        self.receive(MockRequest::Signup { activity: activity.to_string(), email: email.to_string() }).await;
        self.check_behaviour(|b| b.can_signup())?;

        let mut activities = lock(&self.activities);
        let target = activities.get_mut(activity)
            .ok_or_else(|| rejected(404, "Activity not found"))?;
        if target.has_participant(email) {
            return Err(rejected(400, "Student is already signed up"));
        }
        if target.spots_left() <= 0 {
            return Err(rejected(400, "Activity is full"));
        }
        target.add_participant(email.to_string());
        Ok(MutationReply::new(format!("Signed up {} for {}", email, activity)))
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError> {
        self.receive(MockRequest::Unregister { activity: activity.to_string(), email: email.to_string() }).await;
        self.check_behaviour(|b| b.can_unregister())?;

        let mut activities = lock(&self.activities);
        let target = activities.get_mut(activity)
            .ok_or_else(|| rejected(404, "Activity not found"))?;
        if target.remove_participant(email) == false {
            return Err(rejected(400, "Student is not signed up for this activity"));
        }
        Ok(MutationReply::new(format!("Unregistered {} from {}", email, activity)))
    }
}


/// The activities of Mergington High School
pub fn school_activities() -> ActivityCollection {
    fn activity(description: &str, schedule: &str, max: i64, participants: &[&str]) -> Activity {
        Activity::new(description, schedule, max, participants.iter().map(|p| p.to_string()).collect())
    }

    vec![
        ("Chess Club".to_string(), activity(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM", 12,
            &["michael@mergington.edu", "daniel@mergington.edu"])),
        ("Programming Class".to_string(), activity(
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM", 20,
            &["emma@mergington.edu", "sophia@mergington.edu"])),
        ("Gym Class".to_string(), activity(
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM", 30,
            &["john@mergington.edu", "olivia@mergington.edu"])),
        ("Soccer Team".to_string(), activity(
            "Join the school soccer team and compete in matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM", 22,
            &["liam@mergington.edu", "noah@mergington.edu"])),
        ("Basketball Team".to_string(), activity(
            "Practice and play basketball with the school team",
            "Wednesdays and Fridays, 3:30 PM - 5:00 PM", 15,
            &["ava@mergington.edu", "mia@mergington.edu"])),
        ("Art Club".to_string(), activity(
            "Explore your creativity through painting and drawing",
            "Thursdays, 3:30 PM - 5:00 PM", 15,
            &["amelia@mergington.edu", "harper@mergington.edu"])),
        ("Drama Club".to_string(), activity(
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM", 20,
            &["ella@mergington.edu", "scarlett@mergington.edu"])),
        ("Math Club".to_string(), activity(
            "Solve challenging problems and participate in math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM", 10,
            &["james@mergington.edu", "benjamin@mergington.edu"])),
        ("Debate Team".to_string(), activity(
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM", 12,
            &["charlotte@mergington.edu", "henry@mergington.edu"])),
    ].into_iter().collect()
}
