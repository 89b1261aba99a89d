//! Vertex CRUD within a project.

use gloo_net::http::Request;

use super::http::{self, ApiError, ApiOutcome};
use super::url;
use crate::models::api::{VertexRequest, VertexResponse};

pub async fn create_vertex(
	project_id: &str,
	request: &VertexRequest,
) -> Result<ApiOutcome<VertexResponse>, ApiError> {
	let path = format!("/projects/{project_id}/vertices");
	let response = Request::post(&url(&path)).json(request)?.send().await?;
	http::read_outcome(response).await
}

pub async fn update_vertex(
	project_id: &str,
	vertex_id: &str,
	request: &VertexRequest,
) -> Result<ApiOutcome<VertexResponse>, ApiError> {
	let path = format!("/projects/{project_id}/vertices/{vertex_id}");
	let response = Request::put(&url(&path)).json(request)?.send().await?;
	http::read_outcome(response).await
}

pub async fn delete_vertex(project_id: &str, vertex_id: &str) -> Result<ApiOutcome<()>, ApiError> {
	let path = format!("/projects/{project_id}/vertices/{vertex_id}");
	let response = Request::delete(&url(&path)).send().await?;
	Ok(http::delete_outcome(response.ok()))
}
