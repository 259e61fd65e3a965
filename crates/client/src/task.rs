//! Background load with cancellation.
//!
//! The state channel starts at [`FetchState::Loading`] and receives exactly one
//! more value when the request finishes. The task publishes only while holding
//! the cancellation lock and only if the flag is unset, so once
//! [`FetchTask::cancel`] returns no further value reaches subscribers.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::DataClient;
use crate::state::FetchState;

pub struct FetchTask {
    handle: Option<JoinHandle<FetchState>>,
    state: watch::Receiver<FetchState>,
    cancelled: Arc<Mutex<bool>>,
}

impl FetchTask {
    /// Must be called from within a tokio runtime.
    pub fn spawn(client: DataClient) -> Self {
        let (tx, rx) = watch::channel(FetchState::Loading);
        let cancelled = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = tokio::spawn(async move {
            let state = client.load().await;
            {
                let cancelled = flag.lock().unwrap_or_else(PoisonError::into_inner);
                if *cancelled {
                    tracing::debug!("discarding data fetched after cancellation");
                } else {
                    tx.send_replace(state.clone());
                }
            }
            state
        });
        Self { handle: Some(handle), state: rx, cancelled }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.clone()
    }

    /// Latest published state.
    pub fn current(&self) -> FetchState {
        self.state.borrow().clone()
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn cancel(&mut self) {
        self.mark_cancelled();
        tracing::debug!("data fetch cancelled");
    }

    /// Wait for the load to finish. `None` if it was cancelled.
    pub async fn join(mut self) -> Option<FetchState> {
        if self.is_cancelled() {
            return None;
        }
        let handle = self.handle.take()?;
        match handle.await {
            Ok(state) => Some(state),
            Err(e) => {
                if e.is_panic() {
                    tracing::error!(error = %e, "data fetch task panicked");
                }
                None
            },
        }
    }

    fn mark_cancelled(&self) {
        *self.cancelled.lock().unwrap_or_else(PoisonError::into_inner) = true;
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.mark_cancelled();
    }
}
