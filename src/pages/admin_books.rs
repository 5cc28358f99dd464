//! Admin book management: table, editor, create/update and delete

use crate::{
    api::ApiOutcome,
    error::AppError,
    format,
    models::book::{Book, BookForm, BookQuery},
    ui::ConfirmOptions,
    AppState,
};

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub stock: i32,
    pub price: String,
    pub cover_url: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            stock: book.stock,
            price: format::format_price(book.price),
            cover_url: format::cover_url(book.cover_image_url.as_deref()).to_string(),
        }
    }
}

/// Open book editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub heading: &'static str,
    pub form: BookForm,
}

pub struct AdminBooksPage {
    state: AppState,
    books: Vec<Book>,
    editor: Option<Editor>,
}

impl AdminBooksPage {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            books: Vec::new(),
            editor: None,
        }
    }

    pub fn rows(&self) -> Vec<BookRow> {
        self.books.iter().map(BookRow::from).collect()
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }

    /// Reload the book list; false when it failed
    pub async fn load(&mut self) -> bool {
        let dialogs = &self.state.dialogs;
        match self.state.services.catalog.search_books(&BookQuery::default()).await {
            ApiOutcome::Success(books) => {
                self.books = books;
                true
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Unknown error".to_string());
                dialogs.error(&format!("Failed to load books: {}", message)).await;
                false
            }
            ApiOutcome::Unauthorized => false,
            ApiOutcome::Failed(e) => {
                tracing::error!("Error loading admin books: {}", e);
                dialogs.error("Network error while loading books").await;
                false
            }
        }
    }

    /// Open the editor blank, or prefilled from a listed book
    pub fn open_editor(&mut self, book_id: Option<i64>) -> Option<&Editor> {
        let editor = match book_id {
            Some(id) => {
                let book = self.books.iter().find(|b| b.id == id)?;
                Editor {
                    heading: "Edit Book",
                    form: BookForm::from_book(book),
                }
            }
            None => Editor {
                heading: "Add New Book",
                form: BookForm::default(),
            },
        };
        self.editor = Some(editor);
        self.editor.as_ref()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Validate and save the editor contents; true when saved
    pub async fn submit(&mut self) -> bool {
        let Some(editor) = &self.editor else {
            return false;
        };
        let form = editor.form.clone();

        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.state.dialogs.error(&super::user_message(&e)).await;
                return false;
            }
        };

        let (outcome, success_message) = match form.book_id() {
            Some(raw_id) => {
                let Ok(id) = raw_id.parse::<i64>() else {
                    self.state.dialogs.error(&format!("Invalid book ID: {}", raw_id)).await;
                    return false;
                };
                (
                    self.state.services.catalog.update_book(id, &payload).await,
                    "Book updated successfully!",
                )
            }
            None => {
                (
                    self.state.services.catalog.create_book(&payload).await,
                    "Book created successfully!",
                )
            }
        };

        match outcome {
            ApiOutcome::Success(_) => {
                self.load().await;
                self.close_editor();
                self.state.dialogs.success(success_message).await;
                true
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Failed to save book".to_string());
                self.state.dialogs.error(&message).await;
                false
            }
            ApiOutcome::Unauthorized => false,
            ApiOutcome::Failed(e) => {
                tracing::error!("Submit error: {}", e);
                self.state
                    .dialogs
                    .error(&format!("Error occurred while saving book: {}", e))
                    .await;
                false
            }
        }
    }

    /// Confirm and delete a book; true when deleted
    pub async fn delete(&mut self, book_id: i64) -> bool {
        let confirmed = self
            .state
            .dialogs
            .confirm(
                "Are you sure you want to delete this book?",
                "Delete Confirmation",
                ConfirmOptions::default(),
            )
            .await;
        if !confirmed {
            return false;
        }

        match self.state.services.catalog.delete_book(book_id).await {
            ApiOutcome::Success(_) => {
                self.load().await;
                self.state.dialogs.success("Book deleted successfully!").await;
                true
            }
            ApiOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| "Failed to delete book".to_string());
                self.state.dialogs.error(&message).await;
                false
            }
            ApiOutcome::Unauthorized => false,
            ApiOutcome::Failed(e) => {
                tracing::error!(book_id, "Delete error: {}", e);
                self.state.dialogs.error("Error occurred while deleting book").await;
                false
            }
        }
    }

    /// Fill the whole editor at once
    pub fn set_form(&mut self, form: BookForm) -> Result<(), AppError> {
        match self.editor.as_mut() {
            Some(editor) => {
                editor.form = form;
                Ok(())
            }
            None => Err(AppError::Internal("Book editor is not open".to_string())),
        }
    }
}
