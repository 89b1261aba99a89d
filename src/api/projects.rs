//! Project listing, creation and deletion.

use gloo_net::http::Request;

use super::http::{self, ApiError, ApiOutcome, UNKNOWN_ERROR};
use super::url;
use crate::models::api::{ProjectRequest, ProjectResponse};

pub async fn fetch_projects() -> Result<ApiOutcome<Vec<ProjectResponse>>, ApiError> {
	let response = Request::get(&url("/projects")).send().await?;
	if !response.ok() {
		return Ok(ApiOutcome::GeneralError(UNKNOWN_ERROR.into()));
	}
	Ok(ApiOutcome::Success(response.json().await?))
}

pub async fn create_project(
	request: &ProjectRequest,
) -> Result<ApiOutcome<ProjectResponse>, ApiError> {
	let response = Request::post(&url("/projects")).json(request)?.send().await?;
	http::read_outcome(response).await
}

/// `delete_output` also removes the build artifacts of the project.
pub async fn delete_project(
	project_id: &str,
	delete_output: bool,
) -> Result<ApiOutcome<()>, ApiError> {
	let path = format!("/projects/{project_id}?delete_output={delete_output}");
	let response = Request::delete(&url(&path)).send().await?;
	Ok(http::delete_outcome(response.ok()))
}
