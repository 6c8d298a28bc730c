//! Core domain types
//!
//! Pure data structures with validation logic - no I/O or external dependencies.

mod endpoint;
mod query;
mod question;
pub mod result;
pub mod row;

pub use endpoint::Endpoint;
pub use query::SqlQuery;
pub use question::Question;
pub use row::{ResultRow, ResultSet};
