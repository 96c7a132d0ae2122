//! Transient status messages, and the phases of the signup and unregistration flows
//!
//! Every posted message is published on a watch channel, so that a UI can follow them. It is cleared after a delay.

use std::fmt::{Display, Error, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::MESSAGE_DISPLAY_DURATION;


/// How a status message should be styled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// The style class of the message area for this kind
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// A message shown to the user after a signup or an unregistration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn success<S: ToString>(text: S) -> Self {
        Self { text: text.to_string(), kind: MessageKind::Success }
    }

    pub fn error<S: ToString>(text: S) -> Self {
        Self { text: text.to_string(), kind: MessageKind::Error }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "[{}] {}", self.kind.css_class(), self.text)
    }
}



/// The flows that talk to the server on behalf of the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Signup,
    Unregister,
}

/// Where a flow currently is.
///
/// `Idle → Submitting → (Succeeded | Failed) → Idle`. The flow goes back to `Idle` when its message is cleared, unless
/// it has been submitted again in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl Default for FlowPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything the message area and the flows currently show
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feedback {
    pub message: Option<StatusMessage>,
    pub signup: FlowPhase,
    pub unregister: FlowPhase,
}

impl Feedback {
    pub fn phase(&self, flow: Flow) -> FlowPhase {
        match flow {
            Flow::Signup => self.signup,
            Flow::Unregister => self.unregister,
        }
    }

    fn set_phase(&mut self, flow: Flow, phase: FlowPhase) {
        match flow {
            Flow::Signup => self.signup = phase,
            Flow::Unregister => self.unregister = phase,
        }
    }
}


/// See [`StatusBoard::subscribe`]
pub type FeedbackSender = tokio::sync::watch::Sender<Feedback>;
/// See [`StatusBoard::subscribe`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<Feedback>;


/// Counts the phase changes of each flow, so that a deferred clear can tell whether its flow moved on
#[derive(Debug, Default)]
struct PhaseCounters {
    signup: AtomicU64,
    unregister: AtomicU64,
}

impl PhaseCounters {
    fn of(&self, flow: Flow) -> &AtomicU64 {
        match flow {
            Flow::Signup => &self.signup,
            Flow::Unregister => &self.unregister,
        }
    }

    /// Returns the new count
    fn bump(&self, flow: Flow) -> u64 {
        self.of(flow).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, flow: Flow, count: u64) -> bool {
        self.of(flow).load(Ordering::SeqCst) == count
    }
}


/// The message area
///
/// Posted messages are hidden after a delay by a deferred task. That task is never cancelled: when a second message is
/// posted within the delay of a first one, the clear scheduled by the first one also hides the second one early.
/// A stale clear never changes the phase of a flow that was entered again since its message was posted.
pub struct StatusBoard {
    sender: Arc<FeedbackSender>,
    phase_counters: Arc<PhaseCounters>,
    display_for: Duration,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::with_display_duration(MESSAGE_DISPLAY_DURATION)
    }

    pub fn with_display_duration(display_for: Duration) -> Self {
        let (sender, _) = tokio::sync::watch::channel(Feedback::default());
        Self {
            sender: Arc::new(sender),
            phase_counters: Arc::new(PhaseCounters::default()),
            display_for,
        }
    }

    /// Get notified every time a message is posted or cleared, or a flow changes phase
    pub fn subscribe(&self) -> FeedbackReceiver {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Feedback {
        self.sender.borrow().clone()
    }

    /// Move a flow to another phase, without touching the message area
    pub fn enter(&self, flow: Flow, phase: FlowPhase) {
        log::debug!("{:?} flow is now {:?}", flow, phase);
        self.phase_counters.bump(flow);
        self.sender.send_modify(|feedback| feedback.set_phase(flow, phase));
    }

    /// Show `message` as the outcome of `flow`, and schedule its clearing.
    ///
    /// This must be called from within a tokio runtime
    pub fn post(&self, flow: Flow, phase: FlowPhase, message: StatusMessage) {
        log::info!("{:?} flow is now {:?}: {}", flow, phase, message);
        let count = self.phase_counters.bump(flow);
        self.sender.send_modify(|feedback| {
            feedback.message = Some(message);
            feedback.set_phase(flow, phase);
        });

        let sender = Arc::clone(&self.sender);
        let phase_counters = Arc::clone(&self.phase_counters);
        let delay = self.display_for;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            log::debug!("Clearing the message of the {:?} flow", flow);
            sender.send_modify(|feedback| {
                feedback.message = None;
                if phase_counters.is_current(flow, count) {
                    feedback.set_phase(flow, FlowPhase::Idle);
                }
            });
        });
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
