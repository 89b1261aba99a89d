//! Edge CRUD within a project.

use gloo_net::http::Request;

use super::http::{self, ApiError, ApiOutcome};
use super::url;
use crate::models::api::{EdgeRequest, EdgeResponse};

pub async fn create_edge(
	project_id: &str,
	request: &EdgeRequest,
) -> Result<ApiOutcome<EdgeResponse>, ApiError> {
	let path = format!("/projects/{project_id}/edges");
	let response = Request::post(&url(&path)).json(request)?.send().await?;
	http::read_outcome(response).await
}

pub async fn update_edge(
	project_id: &str,
	edge_id: &str,
	request: &EdgeRequest,
) -> Result<ApiOutcome<EdgeResponse>, ApiError> {
	let path = format!("/projects/{project_id}/edges/{edge_id}");
	let response = Request::put(&url(&path)).json(request)?.send().await?;
	http::read_outcome(response).await
}

pub async fn delete_edge(project_id: &str, edge_id: &str) -> Result<ApiOutcome<()>, ApiError> {
	let path = format!("/projects/{project_id}/edges/{edge_id}");
	let response = Request::delete(&url(&path)).send().await?;
	Ok(http::delete_outcome(response.ok()))
}
