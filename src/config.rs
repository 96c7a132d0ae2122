//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;
use once_cell::sync::Lazy;

/// The URL of the signup server that [`Client::from_config`](crate::client::Client::from_config) connects to.
/// It is read from the `ACTIVITY_SIGNUP_URL` environment variable if set. Feel free to override it when initing this library.
pub static BASE_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    let url = std::env::var("ACTIVITY_SIGNUP_URL")
        .unwrap_or_else(|_| "http://localhost:8000/".to_string());
    Arc::new(Mutex::new(url))
});

/// How long a status message stays visible
pub const MESSAGE_DISPLAY_DURATION: Duration = Duration::from_secs(5);

pub const SIGNUP_TRANSPORT_FAILURE: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_TRANSPORT_FAILURE: &str = "Failed to unregister. Please try again.";
/// Shown when the server rejects a request without telling why
pub const GENERIC_REJECTION: &str = "An error occurred";

pub const NO_ACTIVITIES_FOUND: &str = "No activities found.";
pub const LOAD_FAILURE: &str = "Failed to load activities. Please try again later.";
pub const LOADING: &str = "Loading activities...";
pub const NO_PARTICIPANTS: &str = "No participants yet";

pub const ACTIVITY_PLACEHOLDER: &str = "-- Select an activity --";
pub const ALL_CATEGORIES: &str = "All categories";
