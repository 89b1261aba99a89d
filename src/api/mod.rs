//! Thin service layer over the backend REST API.
//!
//! One async function per user action, each returning the classified
//! [`ApiOutcome`] or an [`ApiError`] for transport failures.

mod build;
mod edges;
mod graph;
mod http;
mod projects;
mod vertices;

pub use build::build_project;
pub use edges::{create_edge, delete_edge, update_edge};
pub use graph::fetch_graph;
pub use http::{ApiError, ApiOutcome, FieldError, INTERNAL_SERVER_ERROR, UNKNOWN_ERROR};
pub use projects::{create_project, delete_project, fetch_projects};
pub use vertices::{create_vertex, delete_vertex, update_vertex};

/// Backend base URL, baked in at compile time. Empty means same-origin.
fn api_base() -> &'static str {
	option_env!("GRAPHSMITH_SERVER_URL").unwrap_or("")
}

/// Absolute URL for an API path like `/projects/{id}/graph`.
pub(crate) fn url(path: &str) -> String {
	format!("{}/api/v1{}", api_base(), path)
}
