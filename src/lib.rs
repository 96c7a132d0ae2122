//! This crate provides a client for a school activities signup service.
//!
//! It provides an HTTP client in the [`client`] module, that can be used as a stand-alone module.
//!
//! The activities fetched from the server are kept in an [`ActivityStore`](store::ActivityStore), that answers the
//! search, category and sort queries of the activity list without going back to the server.
//!
//! A [`Controller`](controller::Controller) ties both together. It receives user actions as [`Command`](controller::Command)s,
//! re-renders the list, runs the signup and unregistration flows, and shows their outcome as transient status messages.
//! The view models it produces can be turned into HTML by the [`render`] module.

pub mod traits;
pub mod error;

pub mod activity;
pub use activity::{Activity, ActivityCollection};
pub mod category;
pub use category::CategoryIndex;
pub mod view;
pub use view::{SortKey, ViewState};
pub mod store;
pub use store::ActivityStore;

pub mod client;
pub mod feedback;
pub mod render;
pub mod controller;
pub use controller::{Command, Controller};

pub mod config;
pub mod utils;

pub mod mock_behaviour;
pub mod mock_source;

/// The usual controller, connected to the signup server
pub type SignupController = Controller<client::Client>;
