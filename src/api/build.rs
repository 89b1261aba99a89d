//! Build trigger: asks the backend to materialize the designed schema into a
//! running service.

use gloo_net::http::Request;

use super::http::{self, ApiError, ApiOutcome};
use super::url;
use crate::models::api::BuildRequest;

pub async fn build_project(
	project_id: &str,
	request: &BuildRequest,
) -> Result<ApiOutcome<()>, ApiError> {
	let path = format!("/projects/{project_id}/build");
	let response = Request::post(&url(&path)).json(request)?.send().await?;
	http::read_unit_outcome(response).await
}
