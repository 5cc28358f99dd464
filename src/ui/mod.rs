//! User-interface components shared by every page

pub mod headless;
pub mod modal;
pub mod nav;
pub mod navigator;
pub mod terminal;

pub use headless::{ConfirmPolicy, HeadlessResponder};
pub use modal::{ConfirmOptions, DialogKind, Dialogs, ModalController, ModalRequest};
pub use nav::{AuthGate, NavBar, NavVisibility};
pub use navigator::{HistoryNavigator, Navigator, View};
