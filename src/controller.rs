//! This module wires user actions to the store, the renderer and the server
//!
//! User actions arrive as [`Command`]s. Search, filter and sort commands only re-render from the [`ActivityStore`];
//! signups and unregistrations go to the [`ActivitySource`], then trigger a fresh fetch when they succeed.

use std::sync::{Mutex, MutexGuard};

use crate::activity::{Activity, ActivityCollection};
use crate::category::CategoryIndex;
use crate::config;
use crate::error::SourceError;
use crate::feedback::{Feedback, FeedbackReceiver, Flow, FlowPhase, StatusBoard, StatusMessage};
use crate::render::{self, ListView, RemovalAction, SelectOption};
use crate::store::ActivityStore;
use crate::traits::{ActivitySource, MutationReply};
use crate::utils::lock;
use crate::view::{SortKey, ViewState};


/// A user action
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Fetch the activities again
    Refresh,
    /// The search text changed
    SetSearch(String),
    /// The category filter changed (`""` means every category)
    SetCategory(String),
    SetSort(SortKey),
    /// The email field of the signup form changed
    SetEmail(String),
    /// The activity drop-down of the signup form changed
    SelectActivity(String),
    /// The signup form was submitted
    SubmitSignup,
    /// A participant removal button was clicked
    Unregister(RemovalAction),
}

/// The fields of the signup form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Both fields are required
    pub fn is_complete(&self) -> bool {
        self.email.is_empty() == false && self.activity.is_empty() == false
    }
}


/// What the signup page currently holds and displays
#[derive(Debug, Default)]
struct PageState {
    store: ActivityStore,
    view: ViewState,
    form: SignupForm,

    list: ListView,
    activity_options: Vec<SelectOption>,
    category_options: Vec<SelectOption>,
}

impl PageState {
    fn render(&mut self) {
        let entries = self.store.query(&self.view);
        self.list = ListView::from_entries(entries);
    }

    fn load(&mut self, collection: ActivityCollection) {
        self.store.load(collection);
        self.activity_options = render::activity_options(self.store.activities());
        if self.store.get(&self.form.activity).is_none() {
            self.form.activity.clear();
        }
        self.render();
    }
}


/// The interaction controller of the signup page.
///
/// It owns the local copy of the activities, what the user asked to see, and what is currently displayed.
/// Every method takes `&self`: the page state is locked only between two requests, so that search, filter and sort
/// commands are handled while a signup or an unregistration is in flight. When requests overlap, the last one to
/// complete decides what is displayed.
pub struct Controller<S>
where
    S: ActivitySource,
{
    source: S,
    state: Mutex<PageState>,
    status: StatusBoard,
}

impl<S> Controller<S>
where
    S: ActivitySource,
{
    /// Create a controller. Nothing is fetched until [`Self::refresh`] (or [`Command::Refresh`]) is called
    pub fn new(source: S, categories: CategoryIndex) -> Self {
        Self::with_status_board(source, categories, StatusBoard::new())
    }

    pub fn with_status_board(source: S, categories: CategoryIndex, status: StatusBoard) -> Self {
        let state = PageState {
            category_options: render::category_options(&categories),
            activity_options: render::activity_options(&ActivityCollection::new()),
            store: ActivityStore::new(categories),
            ..PageState::default()
        };
        Self {
            source,
            state: Mutex::new(state),
            status,
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        lock(&self.state)
    }

    pub fn source(&self) -> &S { &self.source }
    pub fn view_state(&self) -> ViewState { self.state().view.clone() }
    pub fn form(&self) -> SignupForm { self.state().form.clone() }
    /// The current content of the list area
    pub fn list(&self) -> ListView { self.state().list.clone() }
    pub fn activity_options(&self) -> Vec<SelectOption> { self.state().activity_options.clone() }
    pub fn category_options(&self) -> Vec<SelectOption> { self.state().category_options.clone() }

    /// The activities from the last successful fetch, in server order
    pub fn activities(&self) -> ActivityCollection {
        self.state().store.activities().clone()
    }

    pub fn activity(&self, name: &str) -> Option<Activity> {
        self.state().store.get(name).cloned()
    }

    /// The message area and the phases of both flows
    pub fn feedback(&self) -> Feedback {
        self.status.current()
    }

    /// Get notified of every change of the message area
    pub fn subscribe_feedback(&self) -> FeedbackReceiver {
        self.status.subscribe()
    }

    /// Handle a user action
    pub async fn dispatch(&self, command: Command) {
        log::trace!("Dispatching {:?}", command);
        match command {
            Command::Refresh => self.reload().await,
            Command::SetSearch(search) => {
                let mut state = self.state();
                state.view.set_search(search);
                state.render();
            },
            Command::SetCategory(category) => {
                let mut state = self.state();
                state.view.set_category(&category);
                state.render();
            },
            Command::SetSort(sort) => {
                let mut state = self.state();
                state.view.set_sort(sort);
                state.render();
            },
            Command::SetEmail(email) => self.state().form.email = email,
            Command::SelectActivity(activity) => self.state().form.activity = activity,
            Command::SubmitSignup => {
                self.submit_signup().await;
            },
            Command::Unregister(action) => {
                self.unregister(action).await;
            },
        }
    }

    /// Replace the content of the list area with the activities matching the current view state
    pub fn render(&self) {
        self.state().render();
    }

    /// Fetch every activity from the source, then rebuild the activity drop-down and the list area.
    ///
    /// In case of failure, the list area shows an error and the store, the view state and the form are left untouched
    pub async fn refresh(&self) -> Result<(), SourceError> {
        let fetched = self.source.get_activities().await;

        let mut state = self.state();
        match fetched {
            Ok(collection) => {
                state.load(collection);
                Ok(())
            },
            Err(err) => {
                state.list = ListView::LoadFailed;
                Err(err)
            },
        }
    }

    /// Refresh, for the flows that only need the list area to tell about a failure
    async fn reload(&self) {
        if let Err(err) = self.refresh().await {
            log::error!("Error fetching activities: {}", err);
        }
    }

    /// Submit the signup form
    pub async fn submit_signup(&self) -> FlowPhase {
        let form = self.form();
        if form.is_complete() == false {
            log::warn!("The signup form is incomplete, not submitting it");
            return FlowPhase::Idle;
        }

        self.status.enter(Flow::Signup, FlowPhase::Submitting);
        let result = self.source.signup(&form.activity, &form.email).await;

        let phase = self.conclude(Flow::Signup, result, config::SIGNUP_TRANSPORT_FAILURE);
        if phase == FlowPhase::Succeeded {
            self.state().form.reset();
            self.reload().await;
        }
        phase
    }

    /// Remove a participant from an activity
    pub async fn unregister(&self, action: RemovalAction) -> FlowPhase {
        self.status.enter(Flow::Unregister, FlowPhase::Submitting);
        let result = self.source.unregister(&action.activity, &action.email).await;

        let phase = self.conclude(Flow::Unregister, result, config::UNREGISTER_TRANSPORT_FAILURE);
        if phase == FlowPhase::Succeeded {
            self.reload().await;
        }
        phase
    }

    /// Show the outcome of a flow, and tell which phase it ended in
    fn conclude(&self, flow: Flow, result: Result<MutationReply, SourceError>, transport_failure: &str) -> FlowPhase {
        match result {
            Ok(reply) => {
                self.status.post(flow, FlowPhase::Succeeded, StatusMessage::success(reply.message));
                FlowPhase::Succeeded
            },
            Err(err) if err.is_rejection() => {
                log::warn!("{:?} was rejected: {}", flow, err);
                let text = err.detail().unwrap_or(config::GENERIC_REJECTION);
                self.status.post(flow, FlowPhase::Failed, StatusMessage::error(text));
                FlowPhase::Failed
            },
            Err(err) => {
                log::error!("Error during {:?}: {}", flow, err);
                self.status.post(flow, FlowPhase::Failed, StatusMessage::error(transport_failure));
                FlowPhase::Failed
            },
        }
    }
}
