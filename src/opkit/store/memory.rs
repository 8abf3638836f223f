use super::SessionState;
use parking_lot::{Mutex, MutexGuard};

/// In-memory session shared by every caller of one API handle.
///
/// Nothing is persisted; the state lives as long as the process does.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the session lock. Every read or write of either buffer goes through
    /// the returned guard.
    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock()
    }

    /// Clones the current state under the lock.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct SessionFixture {
        pub state: SessionState,
        pub page_size: usize,
    }

    impl Default for SessionFixture {
        fn default() -> Self {
            Self::new(crate::config::DEFAULT_PAGE_SIZE)
        }
    }

    impl SessionFixture {
        pub fn new(page_size: usize) -> Self {
            Self {
                state: SessionState::default(),
                page_size,
            }
        }

        pub fn with_input(mut self, text: &str) -> Self {
            self.state.input.replace(text.to_string(), self.page_size);
            self
        }

        pub fn with_output(mut self, text: &str) -> Self {
            self.state.output.replace(text.to_string(), self.page_size);
            self
        }

        pub fn into_session(self) -> Session {
            Session {
                state: Mutex::new(self.state),
            }
        }
    }
}
