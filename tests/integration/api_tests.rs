//! API integration tests against a mock BookNest server

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booknest_client::{
    api::ApiOutcome,
    config::AppConfig,
    error::AppError,
    models::{book::BookQuery, user::Role, User},
    pages::{
        AdminBooksPage, AuthPage, AuthTab, BorrowControl, BorrowFormPage, BorrowOutcome,
        CatalogPage, CatalogView, DetailPage, DetailView, Feedback, HistoryPage, HistoryView,
        LoginOutcome, RequestAction, RequestsPage, UserHistoryPage,
    },
    session::{Session, SessionProvider, TOKEN_KEY, USER_KEY},
    ui::{ConfirmPolicy, HeadlessResponder, HistoryNavigator, ModalController, View},
    AppState,
};

struct Harness {
    state: AppState,
    session: SessionProvider,
    navigator: Arc<HistoryNavigator>,
    responder: HeadlessResponder,
}

fn harness(server: &MockServer, policy: ConfirmPolicy) -> Harness {
    let mut config = AppConfig::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.api.timeout_secs = 5;
    config.ui.redirect_delay_ms = 0;

    let session = SessionProvider::in_memory();
    let modal = Arc::new(ModalController::new());
    let responder = HeadlessResponder::spawn(modal.clone(), policy);
    let navigator = Arc::new(HistoryNavigator::default());
    let state = AppState::new(config, session.clone(), modal, navigator.clone())
        .expect("Failed to build app state");

    Harness {
        state,
        session,
        navigator,
        responder,
    }
}

fn login_as(session: &SessionProvider, role: Role) {
    session
        .set_session(&Session {
            user: User {
                id: 42,
                username: "reader".into(),
                email: "reader@example.org".into(),
                role,
            },
            token: "tok-123".into(),
        })
        .expect("Failed to store session");
}

fn books_body() -> Value {
    json!({
        "success": true,
        "data": [
            {"id": 1, "title": "Dune", "author": "Frank Herbert", "stock": 0, "price": "12.50"},
            {"id": 2, "title": "Foundation", "author": "Isaac Asimov", "stock": 3, "price": 9.9}
        ]
    })
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true}))
}

#[tokio::test]
async fn test_requests_carry_bearer_token_only_when_logged_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let query = BookQuery::default();

    assert!(h.state.services.catalog.search_books(&query).await.is_success());
    login_as(&h.session, Role::User);
    assert!(h.state.services.catalog.search_books(&query).await.is_success());

    let requests = server.received_requests().await.expect("Request recording disabled");
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").map(|v| v.to_str().unwrap_or_default()),
        Some("Bearer tok-123")
    );
    assert_eq!(
        requests[1].headers.get("content-type").map(|v| v.to_str().unwrap_or_default()),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/borrows/user/42"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>expired</html>"))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let outcome = h.state.services.borrows.user_history(42).await;

    assert!(matches!(outcome, ApiOutcome::Unauthorized));
    assert_eq!(h.session.storage().get(USER_KEY).unwrap(), None);
    assert_eq!(h.session.storage().get(TOKEN_KEY).unwrap(), None);
    assert_eq!(h.navigator.current(), View::Account);
    assert_eq!(
        h.responder.messages(),
        vec!["Authentication failed, please login again".to_string()]
    );
}

#[tokio::test]
async fn test_invalid_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let outcome = h.state.services.catalog.search_books(&BookQuery::default()).await;
    assert!(matches!(outcome, ApiOutcome::Failed(AppError::InvalidJson(_))));

    // the session survives a malformed success response
    assert!(h.session.get_session().is_some());

    let view = CatalogPage::new(h.state.clone()).load_books(&BookQuery::default()).await;
    assert_eq!(view, CatalogView::Error("Network error while loading books".to_string()));
}

#[tokio::test]
async fn test_success_false_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Catalog offline"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let view = CatalogPage::new(h.state.clone()).load_books(&BookQuery::default()).await;
    assert_eq!(view, CatalogView::Error("Catalog offline".to_string()));
}

#[tokio::test]
async fn test_search_trims_and_filters_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("title", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let view = CatalogPage::new(h.state.clone()).search("  dune ", "   ").await;

    let CatalogView::Books(cards) = view else {
        panic!("expected books, got {:?}", view);
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Dune");
    // guests get no borrow control
    assert_eq!(cards[0].borrow, None);

    let requests = server.received_requests().await.expect("Request recording disabled");
    assert_eq!(requests[0].url.query(), Some("title=dune"));
}

#[tokio::test]
async fn test_stock_labels_for_readers_and_admins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let page = CatalogPage::new(h.state.clone());

    login_as(&h.session, Role::User);
    let CatalogView::Books(cards) = page.load_books(&BookQuery::default()).await else {
        panic!("expected books");
    };
    assert_eq!(cards[0].borrow, Some(BorrowControl { enabled: false, label: "Out of Stock" }));
    assert_eq!(cards[1].borrow, Some(BorrowControl { enabled: true, label: "Borrow" }));

    login_as(&h.session, Role::Admin);
    let CatalogView::Books(cards) = page.load_books(&BookQuery::default()).await else {
        panic!("expected books");
    };
    assert!(cards.iter().all(|c| c.borrow.is_none()));
}

#[tokio::test]
async fn test_borrow_without_session_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/borrows"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let outcome = CatalogPage::new(h.state.clone()).borrow_book(1).await;

    assert_eq!(outcome, BorrowOutcome::LoginRequired);
    assert_eq!(h.navigator.current(), View::Account);
    assert_eq!(h.responder.messages(), vec!["Please login first to borrow books".to_string()]);
}

#[tokio::test]
async fn test_borrow_confirmed_posts_and_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/borrows"))
        .and(body_json(json!({"book_id": 2})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let outcome = CatalogPage::new(h.state.clone()).borrow_book(2).await;
    assert!(matches!(outcome, BorrowOutcome::Submitted(CatalogView::Books(_))));
    assert_eq!(
        h.responder.messages(),
        vec![
            "Are you sure you want to borrow this book?".to_string(),
            "Borrow request submitted successfully! Please wait for admin approval.".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_borrow_declined_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/borrows"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Decline);
    login_as(&h.session, Role::User);

    let outcome = CatalogPage::new(h.state.clone()).borrow_book(2).await;
    assert_eq!(outcome, BorrowOutcome::Cancelled);
}

#[tokio::test]
async fn test_login_stores_session_and_routes_admin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "root@example.org", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 1, "username": "root", "email": "root@example.org", "role": "admin"},
            "access_token": "admin-token"
        })))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let mut page = AuthPage::new(h.state.clone());

    let outcome = page.login(" root@example.org ", "pw").await;
    assert_eq!(outcome, LoginOutcome::LoggedIn(View::AdminBooks));
    assert_eq!(h.session.token().as_deref(), Some("admin-token"));
    assert!(page.is_admin());
    assert_eq!(h.navigator.current(), View::AdminBooks);
    assert_eq!(h.responder.messages(), vec!["Login successful!".to_string()]);

    let requests = server.received_requests().await.expect("Request recording disabled");
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_wrong_password_is_not_a_logout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let outcome = AuthPage::new(h.state.clone()).login("reader@example.org", "nope").await;
    assert_eq!(outcome, LoginOutcome::Rejected("Invalid credentials".to_string()));
    // the stored session is untouched and no redirect happened
    assert!(h.session.get_session().is_some());
    assert_eq!(h.navigator.history(), vec![View::Home]);
    assert_eq!(h.responder.messages(), vec!["Login failed: Invalid credentials".to_string()]);
}

#[tokio::test]
async fn test_admin_creates_book() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/books"))
        .and(body_json(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "description": "Desert planet",
            "stock": 3,
            "price": 12.5,
            "cover_image_url": null
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);
    let mut page = AdminBooksPage::new(h.state.clone());

    assert_eq!(page.open_editor(None).map(|e| e.heading), Some("Add New Book"));
    if let Some(editor) = page.editor_mut() {
        editor.form.title = " Dune ".into();
        editor.form.author = "Frank Herbert".into();
        editor.form.description = "Desert planet".into();
        editor.form.stock = "3".into();
        editor.form.price = "12.5".into();
        editor.form.cover_image_url = "  ".into();
    }

    assert!(page.submit().await);
    assert!(page.editor().is_none());
    assert_eq!(page.rows().len(), 2);
    assert_eq!(page.rows()[0].price, "¥12.50");
    assert_eq!(h.responder.messages(), vec!["Book created successfully!".to_string()]);
}

#[tokio::test]
async fn test_admin_updates_existing_book() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/books/2"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/books"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);
    let mut page = AdminBooksPage::new(h.state.clone());
    assert!(page.load().await);

    let editor = page.open_editor(Some(2)).expect("book 2 is listed");
    assert_eq!(editor.heading, "Edit Book");
    assert_eq!(editor.form.title, "Foundation");
    if let Some(editor) = page.editor_mut() {
        editor.form.description = "Psychohistory".into();
    }

    assert!(page.submit().await);
    assert_eq!(h.responder.messages(), vec!["Book updated successfully!".to_string()]);
}

#[tokio::test]
async fn test_invalid_stock_blocks_save() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/books"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);
    let mut page = AdminBooksPage::new(h.state.clone());
    page.open_editor(None);
    if let Some(editor) = page.editor_mut() {
        editor.form.title = "Dune".into();
        editor.form.author = "Frank Herbert".into();
        editor.form.description = "Desert planet".into();
        editor.form.stock = "-1".into();
        editor.form.price = "5".into();
    }

    assert!(!page.submit().await);
    assert!(page.editor().is_some());
    assert_eq!(
        h.responder.messages(),
        vec!["Stock must be a valid non-negative number".to_string()]
    );
}

#[tokio::test]
async fn test_approve_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/borrows/3/borrow_status"))
        .and(body_json(json!({"borrow_status": "borrowed"})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/borrows"))
        .and(query_param("borrow_status", "requested"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);

    let view = RequestsPage::new(h.state.clone()).decide(3, RequestAction::Approve).await;
    assert_eq!(view.map(|v| v.to_string()), Some("No pending requests\n".to_string()));
    assert_eq!(
        h.responder.messages(),
        vec![
            "Are you sure you want to approve this request?".to_string(),
            "Request approved successfully".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_return_declined_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/borrows/5/return"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Decline);
    login_as(&h.session, Role::User);

    assert_eq!(HistoryPage::new(h.state.clone()).return_book(5).await, None);
}

#[tokio::test]
async fn test_borrow_form_redirects_home() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 2, "title": "Foundation", "author": "Isaac Asimov", "stock": 3}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/borrows"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let mut page = BorrowFormPage::open(h.state.clone(), Some(2))
        .await
        .expect("user is logged in");
    assert_eq!(page.book_title(), "Foundation");

    let feedback = page.submit().await;
    assert!(matches!(feedback, Feedback::Success(_)));
    page.wait_redirect().await;
    assert_eq!(h.navigator.current(), View::Home);
    assert_eq!(h.navigator.history(), vec![View::Home, View::Home]);
}

#[tokio::test]
async fn test_missing_list_data_renders_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/borrows/user/42"))
        .respond_with(ok())
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::User);

    let catalog = CatalogPage::new(h.state.clone()).load_books(&BookQuery::default()).await;
    assert_eq!(catalog, CatalogView::Empty);
    assert_eq!(HistoryPage::new(h.state.clone()).load().await, HistoryView::Empty);
    assert!(h.responder.messages().is_empty());
}

#[tokio::test]
async fn test_borrow_with_unreadable_user_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/borrows"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    h.session.storage().set(TOKEN_KEY, "tok-123").unwrap();
    h.session.storage().set(USER_KEY, "{not json").unwrap();
    let page = CatalogPage::new(h.state.clone());

    assert_eq!(page.borrow_book(1).await, BorrowOutcome::LoginRequired);
    h.session.storage().remove(USER_KEY).unwrap();
    assert_eq!(page.borrow_book(1).await, BorrowOutcome::LoginRequired);

    assert_eq!(h.navigator.current(), View::Account);
    assert_eq!(
        h.responder.messages(),
        vec![
            "Failed to get user information, please login again".to_string(),
            "Failed to get user information, please login again".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_user_history_search_and_filtering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("query", "ann"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 7, "username": "ann", "email": "ann@example.org", "role": "user"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/borrows/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"id": 1, "book_id": 1, "user_id": 7, "borrow_status": "requested", "title": "Dune"},
                {"id": 2, "book_id": 2, "user_id": 7, "borrow_status": "borrowed", "title": "Foundation",
                 "borrow_date": "2024-03-05"},
                {"id": 3, "book_id": 3, "user_id": 7, "borrow_status": "rejected", "title": "Hyperion"},
                {"id": 4, "book_id": 4, "user_id": 7, "borrow_status": "returned", "title": "Solaris",
                 "borrow_date": "2024-01-02", "return_date": "2024-01-20"}
            ]
        })))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);
    let page = UserHistoryPage::new(h.state.clone());

    assert_eq!(page.search("   ").await, None);
    assert_eq!(
        h.responder.messages(),
        vec!["Please enter username or email to search".to_string()]
    );

    let users = page.search(" ann ").await.expect("keyword is not blank");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, 7);

    let view = page.history(7, Some("ann")).await;
    assert_eq!(view.heading, "ann");
    let titles: Vec<_> = view.rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Foundation", "Solaris"]);
    assert_eq!(view.rows[0].return_date, "-");
    assert_eq!(view.rows[1].status, "Returned");

    assert_eq!(page.history(7, None).await.heading, "User");
}

#[tokio::test]
async fn test_admin_deletes_book_then_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/books/1"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(books_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);
    let mut page = AdminBooksPage::new(h.state.clone());

    assert!(page.delete(1).await);
    assert_eq!(page.rows().len(), 2);
    assert_eq!(
        h.responder.messages(),
        vec![
            "Are you sure you want to delete this book?".to_string(),
            "Book deleted successfully!".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_deny_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/borrows/9/borrow_status"))
        .and(body_json(json!({"borrow_status": "rejected"})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/borrows"))
        .and(query_param("borrow_status", "requested"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    login_as(&h.session, Role::Admin);

    let view = RequestsPage::new(h.state.clone()).decide(9, RequestAction::Deny).await;
    assert!(view.is_some());
    assert_eq!(
        h.responder.messages(),
        vec![
            "Are you sure you want to deny this request?".to_string(),
            "Request denied successfully".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_registration_switches_to_login_tab() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "ann",
            "email": "ann@example.org",
            "password": "secret",
            "role": "user"
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let mut page = AuthPage::new(h.state.clone());
    page.switch_tab(AuthTab::Register);

    assert!(page.register(" ann ", "ann@example.org", "secret", Role::User).await);
    assert_eq!(page.tab(), AuthTab::Login);
    assert_eq!(
        h.responder.messages(),
        vec!["Registration successful! Please login.".to_string()]
    );
}

#[tokio::test]
async fn test_detail_rejection_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/404"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Book not found"})),
        )
        .mount(&server)
        .await;

    let h = harness(&server, ConfirmPolicy::Accept);
    let view = DetailPage::new(h.state.clone()).load(Some(404)).await;

    assert_eq!(
        view,
        DetailView::Error("Failed to load book details. Book not found".to_string())
    );
}
