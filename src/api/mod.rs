//! API layer - HTTP transport
//!
//! Routes, handlers and the error envelope. Handlers only decode requests,
//! delegate to the application layer and shape responses.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use router::{build_router, cors_layer};
pub use server::serve;
