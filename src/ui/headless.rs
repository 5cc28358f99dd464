//! Frontend that answers dialogs without a user

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use super::modal::{ButtonStyle, ModalController, ModalRequest};

/// How confirmation dialogs are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    Accept,
    Decline,
}

impl ConfirmPolicy {
    fn choose(&self, request: &ModalRequest) -> usize {
        let wanted = match self {
            ConfirmPolicy::Accept => ButtonStyle::Primary,
            ConfirmPolicy::Decline => ButtonStyle::Secondary,
        };
        request
            .buttons
            .iter()
            .position(|b| b.style == wanted)
            .unwrap_or(0)
    }
}

/// Watches the modal slot and activates a button on every dialog.
///
/// Every answered dialog is kept in a transcript. The watcher task is
/// aborted when the responder is dropped.
pub struct HeadlessResponder {
    transcript: Arc<Mutex<Vec<ModalRequest>>>,
    task: JoinHandle<()>,
}

impl HeadlessResponder {
    pub fn spawn(modal: Arc<ModalController>, policy: ConfirmPolicy) -> Self {
        let transcript = Arc::new(Mutex::new(Vec::new()));
        let seen = transcript.clone();
        let mut shown = modal.subscribe();

        let task = tokio::spawn(async move {
            loop {
                let request = shown.borrow_and_update().clone();
                if let Some(request) = request {
                    let choice = policy.choose(&request);
                    tracing::info!(
                        title = %request.title,
                        message = %request.message,
                        answer = request.buttons.get(choice).map(|b| b.text.as_str()).unwrap_or(""),
                        "Answering dialog"
                    );
                    if let Ok(mut seen) = seen.lock() {
                        seen.push(request);
                    }
                    modal.activate(choice);
                }
                if shown.changed().await.is_err() {
                    break;
                }
            }
        });

        Self { transcript, task }
    }

    /// Every dialog answered so far
    pub fn transcript(&self) -> Vec<ModalRequest> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Messages of the answered dialogs, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.transcript().into_iter().map(|r| r.message).collect()
    }
}

impl Drop for HeadlessResponder {
    fn drop(&mut self) {
        self.task.abort();
    }
}
