//! Editable form state for the sidebar and modal dialogs. Every form carries
//! its own per-field error slots so 422 responses can be routed back onto the
//! inputs that caused them.

use uuid::Uuid;

use super::schema::{Datatype, Edge, Property, Vertex};
use crate::api::FieldError;

/// One editable property row. `row_id` only identifies the row in the UI list
/// and never leaves the client.
#[derive(Clone, Debug, PartialEq)]
pub struct FormProperty {
	pub row_id: Uuid,
	pub key: String,
	pub required: bool,
	pub datatype: Datatype,
	pub error: String,
}

impl FormProperty {
	pub fn empty() -> Self {
		FormProperty {
			row_id: Uuid::new_v4(),
			key: String::new(),
			required: true,
			datatype: Datatype::String,
			error: String::new(),
		}
	}

	pub fn from_property(property: &Property) -> Self {
		FormProperty {
			row_id: Uuid::new_v4(),
			key: property.key.clone(),
			required: property.required,
			datatype: property.datatype,
			error: String::new(),
		}
	}

	pub fn to_property(&self) -> Property {
		Property {
			key: self.key.clone(),
			required: self.required,
			datatype: self.datatype,
		}
	}
}

/// Routes validation errors for a `properties` field onto the row named by
/// the error index. Out-of-range indices are dropped.
fn apply_property_error(properties: &mut [FormProperty], error: &FieldError) {
	let Some(index) = error.index else {
		return;
	};
	if let Some(row) = properties.get_mut(index) {
		row.error = error.message.clone();
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormVertex {
	pub id: Option<String>,
	pub name: String,
	pub radius: f64,
	pub position_x: f64,
	pub position_y: f64,
	pub properties: Vec<FormProperty>,
	pub name_error: String,
}

impl FormVertex {
	pub fn empty() -> Self {
		FormVertex {
			id: None,
			name: String::new(),
			radius: 30.0,
			position_x: 0.0,
			position_y: 0.0,
			properties: vec![],
			name_error: String::new(),
		}
	}

	pub fn from_vertex(vertex: &Vertex) -> Self {
		FormVertex {
			id: Some(vertex.id.clone()),
			name: vertex.label.clone(),
			radius: vertex.radius.round(),
			position_x: vertex.position_x,
			position_y: vertex.position_y,
			properties: vertex.properties.iter().map(FormProperty::from_property).collect(),
			name_error: String::new(),
		}
	}

	pub fn apply_field_errors(&mut self, errors: &[FieldError]) {
		for error in errors {
			match error.field.as_str() {
				"name" => self.name_error = error.message.clone(),
				"properties" => apply_property_error(&mut self.properties, error),
				_ => {}
			}
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormEdge {
	pub id: Option<String>,
	pub name: String,
	pub multi_edge: bool,
	pub source_label: String,
	pub target_label: String,
	pub properties: Vec<FormProperty>,
	pub name_error: String,
}

impl FormEdge {
	pub fn empty() -> Self {
		FormEdge {
			id: None,
			name: String::new(),
			multi_edge: true,
			source_label: String::new(),
			target_label: String::new(),
			properties: vec![],
			name_error: String::new(),
		}
	}

	/// The edge stores vertex ids; the form shows labels, so the caller looks
	/// both endpoints up first.
	pub fn from_edge(edge: &Edge, source_label: String, target_label: String) -> Self {
		FormEdge {
			id: Some(edge.id.clone()),
			name: edge.label.clone(),
			multi_edge: edge.multi_edge,
			source_label,
			target_label,
			properties: edge.properties.iter().map(FormProperty::from_property).collect(),
			name_error: String::new(),
		}
	}

	pub fn apply_field_errors(&mut self, errors: &[FieldError]) {
		for error in errors {
			match error.field.as_str() {
				"name" => self.name_error = error.message.clone(),
				"properties" => apply_property_error(&mut self.properties, error),
				_ => {}
			}
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormProject {
	pub name: String,
	pub name_error: String,
}

impl FormProject {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn apply_field_errors(&mut self, errors: &[FieldError]) {
		for error in errors {
			if error.field == "name" {
				self.name_error = error.message.clone();
			}
		}
	}
}

/// State of the build dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct FormBuild {
	pub port: u16,
	pub port_error: String,
	pub volume: String,
	pub volume_error: String,
}

impl FormBuild {
	pub fn empty() -> Self {
		FormBuild {
			port: 5000,
			port_error: String::new(),
			volume: String::new(),
			volume_error: String::new(),
		}
	}

	pub fn apply_field_errors(&mut self, errors: &[FieldError]) {
		for error in errors {
			match error.field.as_str() {
				"port" => self.port_error = error.message.clone(),
				"volume" => self.volume_error = error.message.clone(),
				_ => {}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn field_error(field: &str, index: Option<usize>, message: &str) -> FieldError {
		FieldError {
			field: field.into(),
			index,
			message: message.into(),
		}
	}

	#[test]
	fn vertex_field_errors_land_in_the_right_slots() {
		let mut form = FormVertex::empty();
		form.properties.push(FormProperty::empty());
		form.properties.push(FormProperty::empty());

		form.apply_field_errors(&[
			field_error("name", None, "already taken"),
			field_error("properties", Some(1), "duplicate key"),
		]);

		assert_eq!(form.name_error, "already taken");
		assert_eq!(form.properties[0].error, "");
		assert_eq!(form.properties[1].error, "duplicate key");
	}

	#[test]
	fn property_error_with_out_of_range_index_is_dropped() {
		let mut form = FormVertex::empty();
		form.properties.push(FormProperty::empty());
		form.apply_field_errors(&[field_error("properties", Some(5), "bad")]);
		assert_eq!(form.properties[0].error, "");
	}

	#[test]
	fn unknown_fields_are_ignored() {
		let mut form = FormEdge::empty();
		form.apply_field_errors(&[field_error("color", None, "nope")]);
		assert_eq!(form, FormEdge::empty());
	}

	#[test]
	fn build_field_errors() {
		let mut form = FormBuild::empty();
		form.apply_field_errors(&[
			field_error("port", None, "port in use"),
			field_error("volume", None, "not a path"),
		]);
		assert_eq!(form.port_error, "port in use");
		assert_eq!(form.volume_error, "not a path");
	}

	#[test]
	fn form_vertex_round_trips_a_vertex() {
		let vertex = Vertex {
			id: "v1".into(),
			label: "Person".into(),
			properties: vec![Property {
				key: "age".into(),
				required: false,
				datatype: Datatype::Int,
			}],
			position_x: 10.0,
			position_y: 20.0,
			radius: 29.6,
		};
		let form = FormVertex::from_vertex(&vertex);
		assert_eq!(form.id.as_deref(), Some("v1"));
		assert_eq!(form.radius, 30.0);
		assert_eq!(form.properties[0].to_property(), vertex.properties[0]);
	}

	#[test]
	fn empty_edge_form_defaults_to_multi_edge() {
		assert!(FormEdge::empty().multi_edge);
	}
}
