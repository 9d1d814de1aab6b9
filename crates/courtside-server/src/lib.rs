//! Courtside HTTP Server
//!
//! Serves the chat pipeline and the direct stats lookups under `/nba`.

mod error;
mod routes;
mod server;
mod state;

pub use error::{ApiError, ErrorBody};
pub use routes::{router, LookupResponse};
pub use server::{build_state, start_server};
pub use state::AppState;
