//! Reactive store for the graph being edited, plus the current selection.
//!
//! Mutations only ever run against server-confirmed data: callers apply a
//! response to the store after a `Success` outcome, never before.

use leptos::prelude::*;

use crate::models::form::{FormEdge, FormVertex};
use crate::models::schema::{Edge, Graph, Vertex};

#[derive(Clone, Copy)]
pub struct GraphStore {
	/// `None` until the initial fetch resolves.
	pub graph: RwSignal<Option<Graph>>,
	/// Form snapshot of the selected vertex; mutually exclusive with
	/// `selected_edge`.
	pub selected_vertex: RwSignal<Option<FormVertex>>,
	pub selected_edge: RwSignal<Option<FormEdge>>,
	/// Bumped whenever the canvas should re-center and re-fit the view.
	pub center_epoch: RwSignal<u64>,
}

impl GraphStore {
	pub fn new() -> Self {
		GraphStore {
			graph: RwSignal::new(None),
			selected_vertex: RwSignal::new(None),
			selected_edge: RwSignal::new(None),
			center_epoch: RwSignal::new(0),
		}
	}

	pub fn provide() -> Self {
		let store = Self::new();
		provide_context(store);
		store
	}

	pub fn expect() -> Self {
		expect_context()
	}

	pub fn set_graph(&self, graph: Graph) {
		self.graph.set(Some(graph));
	}

	fn mutate(&self, apply: impl FnOnce(&mut Graph)) {
		self.graph.update(|graph| match graph {
			Some(graph) => apply(graph),
			None => log::error!("graph not loaded, mutation dropped"),
		});
	}

	pub fn add_vertex(&self, vertex: Vertex) {
		self.mutate(|graph| graph.add_vertex(vertex));
	}

	pub fn update_vertex(&self, vertex: Vertex) {
		self.mutate(|graph| graph.update_vertex(vertex));
	}

	/// Removes the vertex and its incident edges; drops the selection if it
	/// pointed at the vertex.
	pub fn delete_vertex(&self, vertex_id: &str) {
		self.mutate(|graph| graph.delete_vertex(vertex_id));
		if self
			.selected_vertex
			.with_untracked(|sel| sel.as_ref().is_some_and(|v| v.id.as_deref() == Some(vertex_id)))
		{
			self.selected_vertex.set(None);
		}
	}

	pub fn add_edge(&self, edge: Edge) {
		self.mutate(|graph| graph.add_edge(edge));
	}

	pub fn update_edge(&self, edge: Edge) {
		self.mutate(|graph| graph.update_edge(edge));
	}

	pub fn delete_edge(&self, edge_id: &str) {
		self.mutate(|graph| graph.delete_edge(edge_id));
		if self
			.selected_edge
			.with_untracked(|sel| sel.as_ref().is_some_and(|e| e.id.as_deref() == Some(edge_id)))
		{
			self.selected_edge.set(None);
		}
	}

	pub fn select_vertex(&self, form: FormVertex) {
		self.selected_edge.set(None);
		self.selected_vertex.set(Some(form));
	}

	pub fn select_edge(&self, form: FormEdge) {
		self.selected_vertex.set(None);
		self.selected_edge.set(Some(form));
	}

	pub fn clear_selection(&self) {
		self.selected_vertex.set(None);
		self.selected_edge.set(None);
	}

	pub fn center_graph(&self) {
		self.center_epoch.update(|epoch| *epoch += 1);
	}
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::models::schema::Property;

	fn vertex(id: &str) -> Vertex {
		Vertex {
			id: id.into(),
			label: id.to_uppercase(),
			properties: vec![],
			position_x: 0.0,
			position_y: 0.0,
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

	fn loaded_store() -> GraphStore {
		let store = GraphStore::new();
		let mut graph = Graph::default();
		graph.add_vertex(vertex("a"));
		graph.add_vertex(vertex("b"));
		graph.add_edge(edge("ab", "a", "b"));
		graph.add_edge(edge("ba", "b", "a"));
		store.set_graph(graph);
		store
	}

	fn vertex_form(store: &GraphStore, id: &str) -> FormVertex {
		store.graph.with_untracked(|graph| {
			FormVertex::from_vertex(graph.as_ref().unwrap().vertex(id).unwrap())
		})
	}

	fn edge_form(store: &GraphStore, id: &str) -> FormEdge {
		store.graph.with_untracked(|graph| {
			let graph = graph.as_ref().unwrap();
			let edge = graph.edge(id).unwrap();
			FormEdge::from_edge(
				edge,
				graph.vertex(&edge.source).unwrap().label.clone(),
				graph.vertex(&edge.target).unwrap().label.clone(),
			)
		})
	}

	#[test]
	fn mutating_an_unloaded_graph_leaves_state_untouched() {
		let store = GraphStore::new();
		store.add_vertex(vertex("a"));
		store.update_vertex(vertex("a"));
		store.delete_vertex("a");
		store.add_edge(edge("ab", "a", "b"));
		store.delete_edge("ab");
		assert_eq!(store.graph.get_untracked(), None);
	}

	#[test]
	fn deleting_the_selected_vertex_clears_the_selection() {
		let store = loaded_store();
		store.select_vertex(vertex_form(&store, "a"));
		store.delete_vertex("a");
		assert_eq!(store.selected_vertex.get_untracked(), None);
	}

	#[test]
	fn deleting_another_vertex_keeps_the_selection() {
		let store = loaded_store();
		let selected = vertex_form(&store, "a");
		store.select_vertex(selected.clone());
		store.delete_vertex("b");
		assert_eq!(store.selected_vertex.get_untracked(), Some(selected));
	}

	#[test]
	fn deleting_the_selected_edge_clears_the_selection() {
		let store = loaded_store();
		store.select_edge(edge_form(&store, "ab"));
		store.delete_edge("ab");
		assert_eq!(store.selected_edge.get_untracked(), None);
	}

	#[test]
	fn deleting_another_edge_keeps_the_selection() {
		let store = loaded_store();
		let selected = edge_form(&store, "ab");
		store.select_edge(selected.clone());
		store.delete_edge("ba");
		assert_eq!(store.selected_edge.get_untracked(), Some(selected));
	}

	#[test]
	fn vertex_and_edge_selections_are_mutually_exclusive() {
		let store = loaded_store();
		store.select_vertex(vertex_form(&store, "a"));
		store.select_edge(edge_form(&store, "ab"));
		assert_eq!(store.selected_vertex.get_untracked(), None);
		assert!(store.selected_edge.get_untracked().is_some());

		store.select_vertex(vertex_form(&store, "b"));
		assert_eq!(store.selected_edge.get_untracked(), None);
		assert!(store.selected_vertex.get_untracked().is_some());
	}

	#[test]
	fn update_flows_through_to_the_graph() {
		let store = loaded_store();
		let mut renamed = vertex("a");
		renamed.label = "Renamed".into();
		renamed.properties.push(Property {
			key: "age".into(),
			required: true,
			datatype: Default::default(),
		});
		store.update_vertex(renamed.clone());
		assert_eq!(
			store.graph.with_untracked(|g| g.as_ref().unwrap().vertex("a").cloned()),
			Some(renamed)
		);
	}
}
