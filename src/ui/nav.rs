//! Navigation bar visibility and its cross-view refresh

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::models::User;
use crate::session::{self, SessionProvider};

/// Which navigation elements are visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavVisibility {
    pub guest_links: bool,
    pub user_links: bool,
    pub admin_link: bool,
    pub welcome: Option<String>,
}

impl NavVisibility {
    pub fn for_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                guest_links: false,
                user_links: true,
                admin_link: user.is_admin(),
                welcome: Some(format!("Welcome, {}", user.username)),
            },
            None => Self {
                guest_links: true,
                user_links: false,
                admin_link: false,
                welcome: None,
            },
        }
    }
}

/// Home page split between the login prompt and the main content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthGate {
    pub login_section: bool,
    pub main_content: bool,
}

impl AuthGate {
    pub fn for_user(user: Option<&User>) -> Self {
        let logged_in = user.is_some();
        Self {
            login_section: !logged_in,
            main_content: logged_in,
        }
    }
}

/// Navigation state of one view, kept current with the stored session
pub struct NavBar {
    session: SessionProvider,
    state: watch::Sender<NavVisibility>,
}

impl NavBar {
    pub fn new(session: SessionProvider) -> Self {
        let initial = NavVisibility::for_user(session.current_user().as_ref());
        let (state, _) = watch::channel(initial);
        Self { session, state }
    }

    pub fn visibility(&self) -> NavVisibility {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavVisibility> {
        self.state.subscribe()
    }

    /// Recompute visibility from storage
    pub fn refresh(&self) -> NavVisibility {
        let visibility = NavVisibility::for_user(self.session.current_user().as_ref());
        self.state.send_if_modified(|current| {
            if *current == visibility {
                false
            } else {
                *current = visibility.clone();
                true
            }
        });
        visibility
    }

    /// Refresh whenever `user` or `token` changes through any handle on the
    /// same storage, including ones held by other views.
    pub fn spawn_sync(self: std::sync::Arc<Self>) -> JoinHandle<()> {
        let mut events = BroadcastStream::new(self.session.subscribe());
        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) if session::is_session_key(&event.key) => {
                        tracing::debug!(key = %event.key, "Session changed elsewhere, refreshing navigation");
                        self.refresh();
                    }
                    Ok(_) => {}
                    // Missed events: the current storage content is what matters
                    Err(_) => {
                        self.refresh();
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::Session;
    use std::sync::Arc;

    fn admin() -> User {
        User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.org".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn visibility_rules() {
        let guest = NavVisibility::for_user(None);
        assert!(guest.guest_links && !guest.user_links && !guest.admin_link);

        let admin = NavVisibility::for_user(Some(&admin()));
        assert!(!admin.guest_links && admin.user_links && admin.admin_link);
        assert_eq!(admin.welcome.as_deref(), Some("Welcome, alice"));

        let mut reader = self::admin();
        reader.role = Role::User;
        assert!(!NavVisibility::for_user(Some(&reader)).admin_link);

        assert_eq!(
            AuthGate::for_user(None),
            AuthGate { login_section: true, main_content: false }
        );
    }

    #[tokio::test]
    async fn other_view_sees_login_and_logout() {
        // Two views over one storage
        let this_tab = SessionProvider::in_memory();
        let other_tab = SessionProvider::new(this_tab.storage().clone());

        let nav = Arc::new(NavBar::new(this_tab));
        let mut changes = nav.subscribe();
        let sync = nav.clone().spawn_sync();
        assert!(nav.visibility().guest_links);

        other_tab
            .set_session(&Session { user: admin(), token: "tok".into() })
            .unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().admin_link);

        other_tab.clear_session().unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().guest_links);

        sync.abort();
    }
}
