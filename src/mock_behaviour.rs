//! Failure injection for the in-memory activity source
#![cfg(feature = "local_mocks")]

use crate::error::SourceError;

/// Failures to inject in a [`MockSource`](crate::mock_source::MockSource)
///
/// Each kind of request is described by `(successes, failures)`: the first `successes` requests are answered, the
/// next `failures` ones fail as if the server could not be reached, and every later one is answered again.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    pub get_activities_behaviour: (u32, u32),
    pub signup_behaviour: (u32, u32),
    pub unregister_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `n_fails` requests of every kind fail
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            get_activities_behaviour: (0, n_fails),
            signup_behaviour: (0, n_fails),
            unregister_behaviour: (0, n_fails),
        }
    }

    pub fn can_get_activities(&mut self) -> Result<(), SourceError> {
        take_turn(&mut self.get_activities_behaviour, "activity fetch")
    }

    pub fn can_signup(&mut self) -> Result<(), SourceError> {
        take_turn(&mut self.signup_behaviour, "signup")
    }

    pub fn can_unregister(&mut self) -> Result<(), SourceError> {
        take_turn(&mut self.unregister_behaviour, "unregistration")
    }
}


fn take_turn(countdown: &mut (u32, u32), request: &str) -> Result<(), SourceError> {
    match countdown {
        (0, 0) => Ok(()),
        (0, failures) => {
            *failures -= 1;
            log::debug!("Mock behaviour: failing this {} ({} more to fail)", request, failures);
            Err(SourceError::transport(format!("mocked failure of a {}", request)))
        },
        (successes, _) => {
            *successes -= 1;
            log::debug!("Mock behaviour: allowing this {} ({} more to allow)", request, successes);
            Ok(())
        },
    }
}
