//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorForm, AuthorInput, AuthorView};
pub use book::{Book, BookData, BookSummary};
pub use book_instance::{
    BookInstance, BookInstanceData, BookInstanceForm, BookInstanceInput, BookInstanceRecord,
    BookInstanceStatus, BookInstanceView,
};
