//! TeachClone HTTP server: router, handlers and shared state.

pub mod create;
pub mod error;
pub mod routes;
pub mod state;
pub mod tutor;

pub use routes::build_router;
pub use state::AppState;
