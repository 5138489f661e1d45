//! recauth HTTP server.
//!
//! This module exposes the router, bootstrap and CLI for use by the unified
//! binary and by integration tests.

mod api;
pub mod cli;
mod convert;
mod error;
mod routes;
mod server;
mod state;

pub use api::{
    AuditLogResponse, CreateRecordBody, DeleteRecordBody, ErrorBody, PaginationResponse,
    RecordAction, RecordResponse, ValidateRecordBody,
};
pub use cli::ServerArgs;
pub use convert::ConvertError;
pub use error::{ApiError, ServerError};
pub use routes::router;
pub use server::{build_state, run_with_shutdown, serve_with_store, store_config};
pub use state::AppState;
pub use tokio_util::sync::CancellationToken;
