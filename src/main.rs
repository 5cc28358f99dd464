//! BookNest command-line client
//!
//! Runs the page controllers against the BookNest API from a terminal.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booknest_client::{
    config::AppConfig,
    models::{
        book::{BookForm, BookQuery},
        user::Role,
    },
    pages::{
        AdminBooksPage, AuthPage, BorrowFormPage, CatalogPage, DetailPage, HistoryPage, HomePage,
        RequestAction, RequestsPage, UserHistoryPage,
    },
    services::health::HealthStatus,
    session::{FileStorage, SessionProvider},
    ui::{
        terminal, ConfirmPolicy, HeadlessResponder, HistoryNavigator, ModalController, NavBar, View,
    },
    AppState,
};

#[derive(Parser)]
#[command(name = "booknest", version, about = "BookNest library lending client")]
struct Cli {
    /// Answer every dialog with its confirm button
    #[arg(long, global = true, conflicts_with = "no")]
    yes: bool,

    /// Answer every dialog with its cancel button
    #[arg(long, global = true)]
    no: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the API is reachable
    Health,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Register with the admin role
        #[arg(long)]
        admin: bool,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List or search the catalog
    Books {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Show one book
    Show { id: i64 },
    /// Quick borrow from the catalog
    Borrow { id: i64 },
    /// Submit the borrow form for a book
    Request { id: i64 },
    /// Personal borrowing history
    History,
    /// Return a borrowed book
    Return { borrow_id: i64 },
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List all books
    Books,
    Add(BookFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete { id: i64 },
    /// List pending borrow requests
    Requests,
    Approve { borrow_id: i64 },
    Deny { borrow_id: i64 },
    /// Search a user and show their history
    UserHistory { keyword: String },
}

#[derive(Args)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    cover: Option<String>,
}

impl BookFields {
    fn apply(self, form: &mut BookForm) {
        let BookFields { title, author, description, stock, price, cover } = self;
        let fields = [
            (title, &mut form.title),
            (author, &mut form.author),
            (description, &mut form.description),
            (stock, &mut form.stock),
            (price, &mut form.price),
            (cover, &mut form.cover_image_url),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("booknest_client={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let cli = Cli::parse();
    tracing::debug!("Starting BookNest client v{}", env!("CARGO_PKG_VERSION"));

    let session = SessionProvider::new(Arc::new(FileStorage::new(&config.session.path)));
    let modal = Arc::new(ModalController::new());
    let navigator = Arc::new(HistoryNavigator::default());

    let headless = match (cli.yes, cli.no) {
        (true, _) => Some(HeadlessResponder::spawn(modal.clone(), ConfirmPolicy::Accept)),
        (_, true) => Some(HeadlessResponder::spawn(modal.clone(), ConfirmPolicy::Decline)),
        _ => None,
    };
    let interactive = headless.is_none().then(|| terminal::spawn(modal.clone()));

    let state = AppState::new(config, session, modal.clone(), navigator.clone())
        .context("Failed to create API client")?;

    let result = run(cli.command, state).await;

    if let Some(handle) = interactive {
        handle.abort();
    }
    if let Some(headless) = headless {
        for dialog in headless.transcript() {
            println!("{} {}: {}", dialog.kind.icon(), dialog.title, dialog.message);
        }
    }
    let visited = navigator.history();
    if visited.len() > 1 {
        println!("-> {}", navigator.current());
    }

    result
}

async fn run(command: Command, state: AppState) -> anyhow::Result<()> {
    match command {
        Command::Health => match state.services.health.check().await {
            HealthStatus::Healthy(service) => {
                println!("API is healthy ({})", service.unwrap_or_else(|| "unknown".to_string()))
            }
            HealthStatus::Unhealthy => println!("API health check failed"),
            HealthStatus::Unreachable(e) => anyhow::bail!("API connection failed: {}", e),
        },
        Command::Login { email, password } => {
            AuthPage::new(state).login(&email, &password).await;
        }
        Command::Register { username, email, password, admin } => {
            let role = if admin { Role::Admin } else { Role::User };
            AuthPage::new(state).register(&username, &email, &password, role).await;
        }
        Command::Logout => AuthPage::new(state).logout(),
        Command::Whoami => {
            let nav = NavBar::new(state.session.clone()).visibility();
            match nav.welcome {
                Some(welcome) => {
                    println!("{}", welcome);
                    if nav.admin_link {
                        println!("Role: admin");
                    }
                }
                None => println!("Not logged in"),
            }
        }
        Command::Books { title, author } => {
            let query = BookQuery::from_inputs(&title, &author);
            if query.is_empty() {
                let home = HomePage::new(state).load().await;
                match home.catalog {
                    Some(catalog) => print!("{}", catalog),
                    None => println!("Please login to browse the catalog"),
                }
            } else {
                print!("{}", CatalogPage::new(state).load_books(&query).await);
            }
        }
        Command::Show { id } => print!("{}", DetailPage::new(state).load(Some(id)).await),
        Command::Borrow { id } => {
            CatalogPage::new(state).borrow_book(id).await;
        }
        Command::Request { id } => {
            if let Some(mut page) = BorrowFormPage::open(state, Some(id)).await {
                println!("Book: {}", page.book_title());
                let feedback = page.submit().await;
                println!("{}", feedback.message());
                page.wait_redirect().await;
            }
        }
        Command::History => print!("{}", HistoryPage::new(state).load().await),
        Command::Return { borrow_id } => {
            if let Some(view) = HistoryPage::new(state).return_book(borrow_id).await {
                print!("{}", view);
            }
        }
        Command::Admin(command) => run_admin(command, state).await?,
    }
    Ok(())
}

async fn run_admin(command: AdminCommand, state: AppState) -> anyhow::Result<()> {
    match command {
        AdminCommand::Books => {
            let mut page = AdminBooksPage::new(state);
            if page.load().await {
                for row in page.rows() {
                    println!("#{}  {}  {}  {}  {}", row.id, row.title, row.author, row.stock, row.price);
                }
            }
        }
        AdminCommand::Add(fields) => {
            let mut page = AdminBooksPage::new(state);
            page.load().await;
            if let Some(editor) = page.open_editor(None) {
                let mut form = editor.form.clone();
                fields.apply(&mut form);
                page.set_form(form)?;
                page.submit().await;
            }
        }
        AdminCommand::Edit { id, fields } => {
            let mut page = AdminBooksPage::new(state);
            page.load().await;
            let Some(editor) = page.open_editor(Some(id)) else {
                anyhow::bail!("Book #{} not found", id);
            };
            let mut form = editor.form.clone();
            fields.apply(&mut form);
            page.set_form(form)?;
            page.submit().await;
        }
        AdminCommand::Delete { id } => {
            let mut page = AdminBooksPage::new(state);
            page.delete(id).await;
        }
        AdminCommand::Requests => print!("{}", RequestsPage::new(state).load().await),
        AdminCommand::Approve { borrow_id } => {
            if let Some(view) = RequestsPage::new(state).decide(borrow_id, RequestAction::Approve).await {
                print!("{}", view);
            }
        }
        AdminCommand::Deny { borrow_id } => {
            if let Some(view) = RequestsPage::new(state).decide(borrow_id, RequestAction::Deny).await {
                print!("{}", view);
            }
        }
        AdminCommand::UserHistory { keyword } => {
            let page = UserHistoryPage::new(state);
            let Some(users) = page.search(&keyword).await else {
                return Ok(());
            };
            let Some(user) = users.first() else {
                println!("No users found.");
                return Ok(());
            };
            for other in &users[1..] {
                println!("Also matched: {}", booknest_client::pages::user_history::user_label(other));
            }
            print!("{}", page.history(user.id, Some(&user.username)).await);
        }
    }
    Ok(())
}
