//! # docdeck
//!
//! A terminal client for project API documentation kept on a remote docs server.
//!
//! ## Features
//! - Projects: list, create, settings edit, delete
//! - API documents with lazily expanded detail rows
//! - Request and response body examples (JSON validated before sending)
//! - URL parameter library and per-document parameter links
//! - Read-only page list
//! - Token sign-in with transparent single-shot refresh
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod api;
pub mod app;
pub mod auth;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use auth::AuthContext;
pub use error::{ApiError, ValidationError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{ApiDocument, BodyKind, HttpMethod, Project, UrlParameter};
pub use network::{ApiClient, NetworkActor};
pub use storage::{Config, Storage};
