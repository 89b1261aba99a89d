//! Domain records for the schema being designed, plus the client-side graph
//! mutations the editor performs between server round-trips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Datatype of a vertex or edge property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Datatype {
	#[default]
	String,
	Int,
	Float,
	Boolean,
}

impl Datatype {
	/// All selectable datatypes, in display order.
	pub const ALL: [Datatype; 4] = [
		Datatype::String,
		Datatype::Int,
		Datatype::Float,
		Datatype::Boolean,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Datatype::String => "String",
			Datatype::Int => "Int",
			Datatype::Float => "Float",
			Datatype::Boolean => "Boolean",
		}
	}
}

impl fmt::Display for Datatype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Datatype {
	type Err = ();

	/// Unknown or empty values fall back to `String`, matching the select
	/// widget's behavior when cleared.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"Int" => Datatype::Int,
			"Float" => Datatype::Float,
			"Boolean" => Datatype::Boolean,
			_ => Datatype::String,
		})
	}
}

/// A typed property attached to a vertex or edge type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
	pub key: String,
	pub required: bool,
	pub datatype: Datatype,
}

/// A vertex type in the schema, positioned on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
	pub id: String,
	pub label: String,
	pub properties: Vec<Property>,
	pub position_x: f64,
	pub position_y: f64,
	pub radius: f64,
}

/// A relationship type between two vertex types. `source`/`target` hold
/// vertex ids; `multi_edge` allows more than one instance per vertex pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: String,
	pub label: String,
	pub properties: Vec<Property>,
	pub multi_edge: bool,
	pub source: String,
	pub target: String,
}

/// A schema-design project.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
	pub id: String,
	pub name: String,
}

/// The full schema graph of one project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub vertices: Vec<Vertex>,
	pub edges: Vec<Edge>,
}

impl Graph {
	pub fn vertex(&self, id: &str) -> Option<&Vertex> {
		self.vertices.iter().find(|v| v.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn vertex_by_label(&self, label: &str) -> Option<&Vertex> {
		self.vertices.iter().find(|v| v.label == label)
	}

	pub fn add_vertex(&mut self, vertex: Vertex) {
		self.vertices.push(vertex);
	}

	/// Replace the vertex with the same id. Logs and leaves the graph
	/// untouched when the id is unknown.
	pub fn update_vertex(&mut self, vertex: Vertex) {
		match self.vertices.iter_mut().find(|v| v.id == vertex.id) {
			Some(slot) => *slot = vertex,
			None => log::error!("update_vertex: vertex {} not found", vertex.id),
		}
	}

	/// Remove a vertex and every edge referencing it as source or target.
	pub fn delete_vertex(&mut self, vertex_id: &str) {
		self.vertices.retain(|v| v.id != vertex_id);
		self.edges
			.retain(|e| e.source != vertex_id && e.target != vertex_id);
	}

	pub fn add_edge(&mut self, edge: Edge) {
		self.edges.push(edge);
	}

	/// Replace the edge with the same id. Logs and leaves the graph untouched
	/// when the id is unknown.
	pub fn update_edge(&mut self, edge: Edge) {
		match self.edges.iter_mut().find(|e| e.id == edge.id) {
			Some(slot) => *slot = edge,
			None => log::error!("update_edge: edge {} not found", edge.id),
		}
	}

	pub fn delete_edge(&mut self, edge_id: &str) {
		self.edges.retain(|e| e.id != edge_id);
	}

	/// Canvas position for a vertex about to be created: a fixed spot for the
	/// first vertex, next to it for the second, the centroid of the existing
	/// vertices afterwards.
	pub fn new_vertex_position(&self) -> (f64, f64) {
		match self.vertices.as_slice() {
			[] => (600.0, 400.0),
			[first] => (first.position_x + 200.0, first.position_y),
			all => {
				let n = all.len() as f64;
				let (sx, sy) = all
					.iter()
					.fold((0.0, 0.0), |(sx, sy), v| (sx + v.position_x, sy + v.position_y));
				((sx / n).round(), (sy / n).round())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn vertex(id: &str, x: f64, y: f64) -> Vertex {
		Vertex {
			id: id.into(),
			label: id.to_uppercase(),
			properties: vec![],
			position_x: x,
			position_y: y,
			radius: 30.0,
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> Edge {
		Edge {
			id: id.into(),
			label: format!("{source}-{target}"),
			properties: vec![],
			multi_edge: false,
			source: source.into(),
			target: target.into(),
		}
	}

	fn sample_graph() -> Graph {
		let mut graph = Graph::default();
		graph.add_vertex(vertex("a", 0.0, 0.0));
		graph.add_vertex(vertex("b", 100.0, 0.0));
		graph.add_vertex(vertex("c", 0.0, 100.0));
		graph.add_edge(edge("ab", "a", "b"));
		graph.add_edge(edge("bc", "b", "c"));
		graph.add_edge(edge("ca", "c", "a"));
		graph
	}

	#[test]
	fn delete_vertex_removes_incident_edges_only() {
		let mut graph = sample_graph();
		graph.delete_vertex("a");

		assert_eq!(
			graph.vertices.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
			vec!["b", "c"]
		);
		// "ab" (source) and "ca" (target) reference "a"; "bc" must survive.
		assert_eq!(
			graph.edges.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
			vec!["bc"]
		);
	}

	#[test]
	fn delete_vertex_with_self_loop() {
		let mut graph = sample_graph();
		graph.add_edge(edge("aa", "a", "a"));
		graph.delete_vertex("a");
		assert!(graph.edge("aa").is_none());
	}

	#[test]
	fn update_vertex_replaces_only_the_matching_entry() {
		let mut graph = sample_graph();
		let mut moved = vertex("b", 250.0, 250.0);
		moved.label = "Renamed".into();
		graph.update_vertex(moved.clone());

		assert_eq!(graph.vertex("b"), Some(&moved));
		assert_eq!(graph.vertex("a"), Some(&vertex("a", 0.0, 0.0)));
		assert_eq!(graph.edges.len(), 3);
	}

	#[test]
	fn update_vertex_with_unknown_id_is_a_noop() {
		let mut graph = sample_graph();
		let before = graph.clone();
		graph.update_vertex(vertex("zzz", 1.0, 1.0));
		assert_eq!(graph, before);
	}

	#[test]
	fn delete_edge_keeps_vertices_and_other_edges() {
		let mut graph = sample_graph();
		graph.delete_edge("ab");
		assert_eq!(graph.vertices.len(), 3);
		assert_eq!(
			graph.edges.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
			vec!["bc", "ca"]
		);
	}

	#[test]
	fn update_edge_replaces_only_the_matching_entry() {
		let mut graph = sample_graph();
		let mut flipped = edge("ab", "b", "a");
		flipped.multi_edge = true;
		graph.update_edge(flipped.clone());

		assert_eq!(graph.edge("ab"), Some(&flipped));
		assert_eq!(graph.edge("bc"), Some(&edge("bc", "b", "c")));
	}

	#[test]
	fn new_vertex_position_placement() {
		let mut graph = Graph::default();
		assert_eq!(graph.new_vertex_position(), (600.0, 400.0));

		graph.add_vertex(vertex("a", 600.0, 400.0));
		assert_eq!(graph.new_vertex_position(), (800.0, 400.0));

		graph.add_vertex(vertex("b", 100.0, 200.0));
		graph.add_vertex(vertex("c", 200.0, 300.0));
		assert_eq!(graph.new_vertex_position(), (300.0, 300.0));
	}

	#[test]
	fn datatype_parses_with_string_fallback() {
		assert_eq!("Int".parse::<Datatype>(), Ok(Datatype::Int));
		assert_eq!("".parse::<Datatype>(), Ok(Datatype::String));
		assert_eq!("Widget".parse::<Datatype>(), Ok(Datatype::String));
	}
}
