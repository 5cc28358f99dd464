//! Modal dialog controller
//!
//! One dialog slot, `CLOSED → OPEN → CLOSED`. Callers get a future that
//! settles when the user picks a button. Every way a dialog can go away
//! (button, backdrop click, Escape, [`ModalController::close`], replacement
//! by a newer dialog) settles its future; dismissal counts as cancel.
//!
//! Renderers observe the active dialog through [`ModalController::subscribe`]
//! and report user input back through `activate`, `click_backdrop` and
//! `press_key`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};

/// Dialog flavour, drives the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogKind {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl DialogKind {
    pub fn icon(&self) -> &'static str {
        match self {
            DialogKind::Info => "💬",
            DialogKind::Warning => "⚠️",
            DialogKind::Error => "❌",
            DialogKind::Success => "✅",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Info => "info",
            DialogKind::Warning => "warning",
            DialogKind::Error => "error",
            DialogKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

impl ButtonStyle {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "modal-btn-primary",
            ButtonStyle::Secondary => "modal-btn-secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub text: String,
    pub style: ButtonStyle,
}

impl ModalButton {
    pub fn primary(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: ButtonStyle::Primary }
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: ButtonStyle::Secondary }
    }
}

/// Content of one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRequest {
    pub title: String,
    pub message: String,
    pub kind: DialogKind,
    pub buttons: Vec<ModalButton>,
}

impl ModalRequest {
    /// Index of the button focused when the dialog opens
    pub fn default_button(&self) -> Option<usize> {
        (!self.buttons.is_empty()).then_some(0)
    }
}

/// Labels and flavour of a confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOptions {
    pub confirm_text: String,
    pub cancel_text: String,
    pub kind: DialogKind,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            kind: DialogKind::Warning,
        }
    }
}

pub const ALERT_BUTTON: &str = "OK";
pub const DEFAULT_ALERT_TITLE: &str = "Notice";
pub const DEFAULT_CONFIRM_TITLE: &str = "Confirm";

/// Index of the confirm button in a confirmation dialog
const CONFIRM_INDEX: usize = 1;

struct ActiveDialog {
    request: ModalRequest,
    responder: oneshot::Sender<Option<usize>>,
}

/// The single dialog slot of the application
pub struct ModalController {
    active: Mutex<Option<ActiveDialog>>,
    shown: watch::Sender<Option<ModalRequest>>,
}

impl ModalController {
    pub fn new() -> Self {
        let (shown, _) = watch::channel(None);
        Self {
            active: Mutex::new(None),
            shown,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<ActiveDialog>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Open a dialog; resolves to the activated button index, or `None` if
    /// the dialog was dismissed or replaced.
    pub fn show(&self, request: ModalRequest) -> oneshot::Receiver<Option<usize>> {
        let (responder, receiver) = oneshot::channel();
        let replaced = self.slot().replace(ActiveDialog {
            request: request.clone(),
            responder,
        });
        if let Some(previous) = replaced {
            tracing::debug!(title = %previous.request.title, "Dialog replaced while open");
            let _ = previous.responder.send(None);
        }
        tracing::debug!(title = %request.title, kind = request.kind.as_str(), "Dialog opened");
        self.shown.send_replace(Some(request));
        receiver
    }

    /// Activate a button of the open dialog. Returns false if there is no
    /// open dialog or no such button.
    pub fn activate(&self, index: usize) -> bool {
        let active = {
            let mut slot = self.slot();
            match slot.as_ref() {
                Some(active) if index < active.request.buttons.len() => slot.take(),
                _ => None,
            }
        };
        match active {
            Some(active) => {
                self.shown.send_replace(None);
                let _ = active.responder.send(Some(index));
                true
            }
            None => false,
        }
    }

    /// Hide the open dialog, settling it as dismissed. No-op when closed.
    pub fn close(&self) {
        let active = self.slot().take();
        if let Some(active) = active {
            tracing::debug!(title = %active.request.title, "Dialog dismissed");
            self.shown.send_replace(None);
            let _ = active.responder.send(None);
        }
    }

    pub fn click_backdrop(&self) {
        self.close();
    }

    pub fn press_key(&self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot().is_some()
    }

    /// Content of the open dialog
    pub fn current(&self) -> Option<ModalRequest> {
        self.shown.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ModalRequest>> {
        self.shown.subscribe()
    }

    pub async fn show_alert(&self, message: &str, kind: DialogKind, title: &str) {
        let choice = self.show(ModalRequest {
            title: title.to_string(),
            message: message.to_string(),
            kind,
            buttons: vec![ModalButton::primary(ALERT_BUTTON)],
        });
        let _ = choice.await;
    }

    pub async fn show_confirm(&self, message: &str, title: &str, options: ConfirmOptions) -> bool {
        let choice = self.show(ModalRequest {
            title: title.to_string(),
            message: message.to_string(),
            kind: options.kind,
            buttons: vec![
                ModalButton::secondary(options.cancel_text),
                ModalButton::primary(options.confirm_text),
            ],
        });
        matches!(choice.await, Ok(Some(CONFIRM_INDEX)))
    }
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialog capability handed to page controllers
#[async_trait]
pub trait Dialogs: Send + Sync {
    async fn alert(&self, message: &str, kind: DialogKind, title: &str);

    async fn confirm(&self, message: &str, title: &str, options: ConfirmOptions) -> bool;

    async fn success(&self, message: &str) {
        self.alert(message, DialogKind::Success, "Success").await
    }

    async fn error(&self, message: &str) {
        self.alert(message, DialogKind::Error, "Error").await
    }

    async fn warning(&self, message: &str) {
        self.alert(message, DialogKind::Warning, "Warning").await
    }
}

#[async_trait]
impl Dialogs for ModalController {
    async fn alert(&self, message: &str, kind: DialogKind, title: &str) {
        self.show_alert(message, kind, title).await
    }

    async fn confirm(&self, message: &str, title: &str, options: ConfirmOptions) -> bool {
        self.show_confirm(message, title, options).await
    }
}
