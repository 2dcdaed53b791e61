//! Synchronous client core for the recipe book service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sit a
//! state store, form validation, the add/edit/delete/lookup orchestration
//! and a plain-text page renderer. The host plugs in a `Transport` that
//! performs the actual round-trips.
//!
//! # Design
//! - `RecipeClient` is stateless; it holds only the endpoint root.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and every response can be scripted in tests.
//! - `RecipeManager` owns all mutable state and absorbs every failure into
//!   the status message.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod manager;
pub mod store;
pub mod types;
pub mod validate;
pub mod view;

pub use client::RecipeClient;
pub use error::{ApiError, GatewayError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use manager::{ManagerOptions, Outcome, RecipeManager};
pub use store::RecipeStore;
pub use types::{Recipe, RecipeField, RecipeForm, RecipeId, UnknownField};
pub use validate::{validate, FieldMissing};
pub use view::{render, ViewOptions};
