//! TeachClone Store: teacher profiles keyed by an opaque client id.

pub mod schema;
pub mod sqlite;

pub use sqlite::ProfileStore;
