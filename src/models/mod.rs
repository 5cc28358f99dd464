//! Data models for BookNest

pub mod book;
pub mod borrow;
pub mod envelope;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookForm, BookPayload, BookQuery};
pub use borrow::{BorrowRecord, BorrowStatus, CreateBorrow, UpdateBorrowStatus};
pub use envelope::{HealthEnvelope, LoginEnvelope};
pub use user::{LoginRequest, RegisterRequest, Role, User};
