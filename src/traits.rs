use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityCollection;
use crate::error::SourceError;


/// What the server answers to a successful signup or unregistration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationReply {
    pub message: String,
}

impl MutationReply {
    pub fn new<S: ToString>(message: S) -> Self {
        Self { message: message.to_string() }
    }
}

/// A place activities are fetched from, and where students sign up.
///
/// This is usually a [`Client`](crate::client::Client) connected to the signup server.
/// Tests use an in-memory `MockSource` (feature `local_mocks`) instead.
#[async_trait]
pub trait ActivitySource {
    /// Returns every activity the source currently knows about.
    /// This is a full snapshot, not a diff
    async fn get_activities(&self) -> Result<ActivityCollection, SourceError>;

    /// Sign up `email` for `activity`
    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError>;

    /// Remove `email` from the participants of `activity`
    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError>;
}
