//! Wire types for the backend REST contract, with conversions from form state
//! (requests) and into domain records (responses).

use serde::{Deserialize, Serialize};

use super::form::{FormBuild, FormEdge, FormProject, FormProperty, FormVertex};
use super::schema::{Edge, Graph, Project, Property, Vertex};

#[derive(Clone, Debug, Deserialize)]
pub struct ProjectResponse {
	pub id: String,
	pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VertexResponse {
	pub id: String,
	pub name: String,
	pub properties: Vec<Property>,
	#[serde(default)]
	pub out_edges: Vec<EdgeResponse>,
	#[serde(default)]
	pub in_edges: Vec<EdgeResponse>,
	pub position_x: f64,
	pub position_y: f64,
	pub radius: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EdgeResponse {
	pub id: String,
	pub name: String,
	pub properties: Vec<Property>,
	pub multi_edge: bool,
	pub source_vertex_id: String,
	pub target_vertex_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphResponse {
	pub vertices: Vec<VertexResponse>,
	pub edges: Vec<EdgeResponse>,
}

impl From<ProjectResponse> for Project {
	fn from(response: ProjectResponse) -> Self {
		Project {
			id: response.id,
			name: response.name,
		}
	}
}

impl From<VertexResponse> for Vertex {
	fn from(response: VertexResponse) -> Self {
		Vertex {
			id: response.id,
			label: response.name,
			properties: response.properties,
			position_x: response.position_x,
			position_y: response.position_y,
			radius: response.radius,
		}
	}
}

impl From<EdgeResponse> for Edge {
	fn from(response: EdgeResponse) -> Self {
		Edge {
			id: response.id,
			label: response.name,
			properties: response.properties,
			multi_edge: response.multi_edge,
			source: response.source_vertex_id,
			target: response.target_vertex_id,
		}
	}
}

impl From<GraphResponse> for Graph {
	fn from(response: GraphResponse) -> Self {
		Graph {
			vertices: response.vertices.into_iter().map(Vertex::from).collect(),
			edges: response.edges.into_iter().map(Edge::from).collect(),
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct ProjectRequest {
	pub name: String,
}

impl ProjectRequest {
	pub fn from_form(form: &FormProject) -> Self {
		ProjectRequest {
			name: form.name.clone(),
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct VertexRequest {
	pub name: String,
	pub properties: Vec<Property>,
	pub radius: f64,
	pub position_x: f64,
	pub position_y: f64,
}

impl VertexRequest {
	pub fn from_form(form: &FormVertex) -> Self {
		Self::from_form_with_position(form, form.position_x, form.position_y)
	}

	/// Build a request with an explicit position, used when the client picks
	/// the spot (auto-placement on create, drag release on the canvas).
	pub fn from_form_with_position(form: &FormVertex, x: f64, y: f64) -> Self {
		VertexRequest {
			name: form.name.clone(),
			properties: form.properties.iter().map(FormProperty::to_property).collect(),
			radius: form.radius,
			position_x: x.round(),
			position_y: y.round(),
		}
	}

	/// Request that re-sends an existing vertex as-is except for a new
	/// position. Used to persist canvas drags.
	pub fn moved(vertex: &Vertex, x: f64, y: f64) -> Self {
		VertexRequest {
			name: vertex.label.clone(),
			properties: vertex.properties.clone(),
			radius: vertex.radius,
			position_x: x.round(),
			position_y: y.round(),
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct EdgeRequest {
	pub name: String,
	pub properties: Vec<Property>,
	pub multi_edge: bool,
	pub source_vertex_id: String,
	pub target_vertex_id: String,
}

impl EdgeRequest {
	/// The form holds vertex labels; the caller resolves them to ids first.
	pub fn from_form(form: &FormEdge, source_vertex_id: String, target_vertex_id: String) -> Self {
		EdgeRequest {
			name: form.name.clone(),
			properties: form.properties.iter().map(FormProperty::to_property).collect(),
			multi_edge: form.multi_edge,
			source_vertex_id,
			target_vertex_id,
		}
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct BuildRequest {
	pub port: u16,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volume: Option<String>,
}

impl BuildRequest {
	pub fn from_form(form: &FormBuild) -> Self {
		BuildRequest {
			port: form.port,
			volume: (!form.volume.is_empty()).then(|| form.volume.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::models::schema::Datatype;

	#[test]
	fn graph_response_maps_to_domain_graph() {
		let response: GraphResponse = serde_json::from_value(json!({
			"vertices": [{
				"id": "v1",
				"name": "Person",
				"properties": [{"key": "age", "required": false, "datatype": "Int"}],
				"out_edges": [],
				"in_edges": [],
				"position_x": 600,
				"position_y": 400,
				"radius": 30
			}],
			"edges": [{
				"id": "e1",
				"name": "knows",
				"properties": [],
				"multi_edge": true,
				"source_vertex_id": "v1",
				"target_vertex_id": "v1"
			}]
		}))
		.unwrap();

		let graph = Graph::from(response);
		assert_eq!(graph.vertices[0].label, "Person");
		assert_eq!(graph.vertices[0].properties[0].datatype, Datatype::Int);
		assert_eq!(graph.edges[0].source, "v1");
		assert!(graph.edges[0].multi_edge);
	}

	#[test]
	fn vertex_response_tolerates_missing_edge_lists() {
		let response: VertexResponse = serde_json::from_value(json!({
			"id": "v1",
			"name": "Person",
			"properties": [],
			"position_x": 0,
			"position_y": 0,
			"radius": 30
		}))
		.unwrap();
		assert!(response.out_edges.is_empty());
		assert!(response.in_edges.is_empty());
	}

	#[test]
	fn build_request_omits_empty_volume() {
		let form = FormBuild::empty();
		let body = serde_json::to_value(BuildRequest::from_form(&form)).unwrap();
		assert_eq!(body, json!({"port": 5000}));

		let mut form = FormBuild::empty();
		form.port = 8080;
		form.volume = "/data".into();
		let body = serde_json::to_value(BuildRequest::from_form(&form)).unwrap();
		assert_eq!(body, json!({"port": 8080, "volume": "/data"}));
	}

	#[test]
	fn vertex_request_rounds_positions() {
		let mut form = FormVertex::empty();
		form.name = "City".into();
		let request = VertexRequest::from_form_with_position(&form, 120.6, 77.2);
		let body = serde_json::to_value(&request).unwrap();
		assert_eq!(
			body,
			json!({
				"name": "City",
				"properties": [],
				"radius": 30.0,
				"position_x": 121.0,
				"position_y": 77.0
			})
		);
	}
}
