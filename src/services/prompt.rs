/// Prompt broker
/// Tracks pending prompt requests by id. Each request owns its options,
/// the answer written by its window, and the channel the answer is delivered on.

use crate::error::{Result, ShellError};
use crate::models::{PromptId, PromptOptions};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;

/// Receives the answer once the prompt window is gone. `None` means the
/// window closed without an answer.
pub type AnswerReceiver = oneshot::Receiver<Option<String>>;

struct PendingPrompt {
    options: PromptOptions,
    answer: Option<String>,
    responder: oneshot::Sender<Option<String>>,
}

struct Inner {
    pending: HashMap<PromptId, PendingPrompt>,
    next_id: u32,
}

pub struct PromptBroker {
    inner: Mutex<Inner>,
}

impl PromptBroker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                pending: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Register a new request and hand back its id and answer receiver.
    pub fn open(&self, options: PromptOptions) -> (PromptId, AnswerReceiver) {
        let (responder, receiver) = oneshot::channel();
        let mut inner = self.inner.lock();

        let id = PromptId(inner.next_id);
        inner.next_id += 1;

        inner.pending.insert(
            id,
            PendingPrompt {
                options,
                answer: None,
                responder,
            },
        );
        log::debug!("[Prompt] Opened request {}", id);

        (id, receiver)
    }

    pub fn options(&self, id: PromptId) -> Result<PromptOptions> {
        self.inner
            .lock()
            .pending
            .get(&id)
            .map(|p| p.options.clone())
            .ok_or(ShellError::UnknownPrompt(id.0))
    }

    /// Record the answer. A later write replaces an earlier one.
    pub fn answer(&self, id: PromptId, value: String) -> Result<()> {
        let mut inner = self.inner.lock();
        let pending = inner
            .pending
            .get_mut(&id)
            .ok_or(ShellError::UnknownPrompt(id.0))?;
        pending.answer = Some(value);
        Ok(())
    }

    /// Deliver the recorded answer and forget the request.
    /// Returns false if the id was not pending.
    pub fn resolve(&self, id: PromptId) -> bool {
        let Some(pending) = self.inner.lock().pending.remove(&id) else {
            return false;
        };

        log::debug!(
            "[Prompt] Resolved request {} ({})",
            id,
            if pending.answer.is_some() { "answered" } else { "dismissed" }
        );
        // The caller may have gone away; nothing left to deliver to.
        let _ = pending.responder.send(pending.answer);
        true
    }

    /// Forget a request whose window never opened. Its receiver sees a closed channel.
    pub fn abandon(&self, id: PromptId) {
        self.inner.lock().pending.remove(&id);
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl Default for PromptBroker {
    fn default() -> Self {
        Self::new()
    }
}
