//! # Quill Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of server-side dependencies so it can be compiled for any client target.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, PostPayload, TagPayload};
