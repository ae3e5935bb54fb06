//! API response types and pagination utilities

pub mod pagination;
pub mod response;

pub use pagination::{PagedResult, PageParams};
pub use response::{Created, DataResponse, NoContent};
