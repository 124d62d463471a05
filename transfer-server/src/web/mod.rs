//! Web layer for the transfer service.
//!
//! Exposes the existence check and the constrained boarding search over a
//! loaded data set, for operations and inspection.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
