//! Thin persistence layer
//!
//! One repository per aggregate, each method a single statement (plus a
//! count for paged reads). Store failures propagate unchanged as
//! `sqlx::Error`; concurrent updates to the same row are last-write-wins.

pub mod categories;
pub mod tasks;

pub use categories::CategoryRepo;
pub use tasks::TaskRepo;
