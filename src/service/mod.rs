//! # Chat Service
//!
//! Client side of the remote chat service: the `ChatService` trait the core
//! talks to, its error type, the JSON wire types, and the reqwest-backed
//! implementation.

pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ChatService, ServiceError};
pub use http::HttpChatService;
pub use types::{InitResponse, ProcessRequest, ProcessResponse};
