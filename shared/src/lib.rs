//! Types shared between the browser frontend, the native client and the
//! backend: wire models, request/response bodies, and the application state
//! machine both clients drive.

pub mod api;
pub mod models;
pub mod state;
pub mod timestamp;
