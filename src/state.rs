//! Per-user dialog state. Lives in process memory only: a restart drops
//! every pending confirmation, which is the intended recovery path.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The one non-idle dialog state: a leave-the-challenge confirmation is
/// waiting for an answer. Absence from the map means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitingLeaveConfirmation,
}

#[derive(Clone, Default)]
pub struct Sessions {
    states: Arc<Mutex<HashMap<i64, SessionState>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn awaiting_leave(&self, user_id: i64) -> bool {
        self.states.lock().await.get(&user_id)
            == Some(&SessionState::AwaitingLeaveConfirmation)
    }

    pub async fn begin_leave(&self, user_id: i64) {
        self.states
            .lock()
            .await
            .insert(user_id, SessionState::AwaitingLeaveConfirmation);
    }

    pub async fn clear(&self, user_id: i64) {
        self.states.lock().await.remove(&user_id);
    }
}
