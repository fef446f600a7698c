//! HTTP server for standalone execution.

mod routes;

pub use routes::{app_router, AppState};
