//! Response envelope handling shared by every service call.
//!
//! The backend answers 2xx with the raw resource, 409 with a single message,
//! and 422 with a list of field validation errors. Everything else (including
//! bodies we cannot parse) collapses into a generic error string.

use gloo_net::http::Response;
use serde::Deserialize;
use serde_json::Value;

/// Message shown when the backend failed in a way we cannot attribute.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Toast message for transport failures where no response was received.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// A validation failure tied to one form field, optionally to one row of a
/// property list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
	pub field: String,
	pub index: Option<usize>,
	pub message: String,
}

/// Classified outcome of a service call. Transport failures are not outcomes;
/// they surface as [`ApiError`].
#[derive(Clone, Debug, PartialEq)]
pub enum ApiOutcome<T> {
	Success(T),
	FieldErrors(Vec<FieldError>),
	GeneralError(String),
}

/// Transport or decoding failure. Callers surface these as a generic
/// "Internal Server Error" toast; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Network(#[from] gloo_net::Error),
}

/// `{"detail": [{"loc": [...], "msg": ...}]}` as sent on 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
	detail: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
	#[serde(default)]
	loc: Vec<Value>,
	msg: String,
}

impl ErrorDetail {
	/// `loc` is `[scope, field]` or `[scope, field, index]`.
	fn field(&self) -> Option<&str> {
		self.loc.get(1).and_then(Value::as_str)
	}

	fn index(&self) -> Option<usize> {
		self.loc.get(2).and_then(Value::as_u64).map(|i| i as usize)
	}
}

pub(crate) enum Failure {
	General(String),
	Fields(Vec<FieldError>),
}

impl<T> From<Failure> for ApiOutcome<T> {
	fn from(failure: Failure) -> Self {
		match failure {
			Failure::General(message) => ApiOutcome::GeneralError(message),
			Failure::Fields(errors) => ApiOutcome::FieldErrors(errors),
		}
	}
}

/// Classify a non-2xx response body.
pub(crate) fn classify_failure(status: u16, body: &str) -> Failure {
	let Ok(body) = serde_json::from_str::<ErrorBody>(body) else {
		return Failure::General(UNKNOWN_ERROR.into());
	};
	let Some(first) = body.detail.first() else {
		return Failure::General(UNKNOWN_ERROR.into());
	};

	match status {
		// Conflicts and missing resources carry a single human-readable message.
		404 | 409 => Failure::General(first.msg.clone()),
		422 => {
			// A location of exactly [_, "properties"] is the backend rejecting
			// the property list as a whole; there is no row to attach it to.
			if first.field() == Some("properties") && first.loc.len() == 2 {
				return Failure::General(first.msg.clone());
			}
			let errors = body
				.detail
				.iter()
				.map(|detail| {
					let field = detail.field().unwrap_or_default().to_owned();
					FieldError {
						index: (field == "properties").then(|| detail.index()).flatten(),
						field,
						message: detail.msg.clone(),
					}
				})
				.collect();
			Failure::Fields(errors)
		}
		_ => Failure::General(UNKNOWN_ERROR.into()),
	}
}

/// Decode a response into an outcome, classifying failures.
pub(crate) async fn read_outcome<T>(response: Response) -> Result<ApiOutcome<T>, ApiError>
where
	T: serde::de::DeserializeOwned,
{
	if response.ok() {
		return Ok(ApiOutcome::Success(response.json::<T>().await?));
	}
	let body = response.text().await.unwrap_or_default();
	Ok(classify_failure(response.status(), &body).into())
}

/// Like [`read_outcome`] for endpoints whose success body we discard.
pub(crate) async fn read_unit_outcome(response: Response) -> Result<ApiOutcome<()>, ApiError> {
	if response.ok() {
		return Ok(ApiOutcome::Success(()));
	}
	let body = response.text().await.unwrap_or_default();
	Ok(classify_failure(response.status(), &body).into())
}

/// DELETE endpoints report nothing useful on failure; collapse everything
/// that is not a success into the generic message.
pub(crate) fn delete_outcome(ok: bool) -> ApiOutcome<()> {
	if ok {
		ApiOutcome::Success(())
	} else {
		ApiOutcome::GeneralError(UNKNOWN_ERROR.into())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn fields(failure: Failure) -> Vec<FieldError> {
		match failure {
			Failure::Fields(errors) => errors,
			Failure::General(message) => panic!("expected field errors, got {message:?}"),
		}
	}

	fn general(failure: Failure) -> String {
		match failure {
			Failure::General(message) => message,
			Failure::Fields(errors) => panic!("expected general error, got {errors:?}"),
		}
	}

	#[test]
	fn conflict_surfaces_the_backend_message() {
		let body = r#"{"detail":[{"loc":["body","name"],"msg":"Vertex already exists"}]}"#;
		assert_eq!(general(classify_failure(409, body)), "Vertex already exists");
	}

	#[test]
	fn missing_project_surfaces_the_backend_message() {
		let body = r#"{"detail":[{"loc":["path","id"],"msg":"Project not found"}]}"#;
		assert_eq!(general(classify_failure(404, body)), "Project not found");
	}

	#[test]
	fn validation_errors_map_fields_and_property_indices() {
		let body = r#"{"detail":[
			{"loc":["body","name"],"msg":"Field required"},
			{"loc":["body","properties",1],"msg":"Key must not be empty"}
		]}"#;
		let errors = fields(classify_failure(422, body));
		assert_eq!(
			errors,
			vec![
				FieldError {
					field: "name".into(),
					index: None,
					message: "Field required".into(),
				},
				FieldError {
					field: "properties".into(),
					index: Some(1),
					message: "Key must not be empty".into(),
				},
			]
		);
	}

	#[test]
	fn list_level_property_error_becomes_general() {
		let body = r#"{"detail":[{"loc":["body","properties"],"msg":"Duplicate property keys"}]}"#;
		assert_eq!(general(classify_failure(422, body)), "Duplicate property keys");
	}

	#[test]
	fn index_is_only_read_for_property_errors() {
		let body = r#"{"detail":[{"loc":["body","name",3],"msg":"Too long"}]}"#;
		let errors = fields(classify_failure(422, body));
		assert_eq!(errors[0].index, None);
	}

	#[test]
	fn unexpected_statuses_and_garbage_bodies_are_unknown() {
		assert_eq!(general(classify_failure(500, "boom")), UNKNOWN_ERROR);
		assert_eq!(general(classify_failure(422, "not json")), UNKNOWN_ERROR);
		assert_eq!(general(classify_failure(409, r#"{"detail":[]}"#)), UNKNOWN_ERROR);
		assert_eq!(
			general(classify_failure(418, r#"{"detail":[{"loc":[],"msg":"teapot"}]}"#)),
			UNKNOWN_ERROR
		);
	}

	#[test]
	fn delete_outcome_is_binary() {
		assert_eq!(delete_outcome(true), ApiOutcome::Success(()));
		assert_eq!(
			delete_outcome(false),
			ApiOutcome::GeneralError(UNKNOWN_ERROR.into())
		);
	}
}
