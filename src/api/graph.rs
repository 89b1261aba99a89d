//! Full-graph fetch for one project.

use gloo_net::http::Request;

use super::http::{self, ApiError, ApiOutcome};
use super::url;
use crate::models::api::GraphResponse;

pub async fn fetch_graph(project_id: &str) -> Result<ApiOutcome<GraphResponse>, ApiError> {
	let path = format!("/projects/{project_id}/graph");
	let response = Request::get(&url(&path)).send().await?;
	http::read_outcome(response).await
}
