//! Schema editor for one project: canvas on the right, vertex/edge forms in a
//! tabbed sidebar, toolbar with center and build actions.

mod edge_form;
mod toolbar;
mod vertex_form;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api::{self, ApiOutcome};
use crate::components::graph_canvas::{CanvasGraph, GraphCanvas, Selection};
use crate::components::toast::Toaster;
use crate::models::api::VertexRequest;
use crate::models::form::{FormEdge, FormVertex};
use crate::models::schema::{Graph, Vertex};
use crate::store::GraphStore;
use edge_form::EdgeForm;
use toolbar::Toolbar;
use vertex_form::VertexForm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EditorTab {
	Vertex,
	Edge,
}

#[component]
pub fn EditorPage() -> impl IntoView {
	let params = use_params_map();
	let project_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
	let store = GraphStore::provide();
	let toaster = Toaster::expect();
	let active_tab = RwSignal::new(EditorTab::Vertex);

	Effect::new(move |_| {
		let id = project_id.get();
		if id.is_empty() {
			return;
		}
		spawn_local(async move {
			match api::fetch_graph(&id).await {
				Ok(ApiOutcome::Success(response)) => store.set_graph(Graph::from(response)),
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Ok(ApiOutcome::FieldErrors(_)) => toaster.error(api::UNKNOWN_ERROR),
				Err(error) => {
					log::error!("graph fetch failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
		});
	});

	let canvas_data = Signal::derive(move || {
		store
			.graph
			.with(|graph| graph.as_ref().map(CanvasGraph::from).unwrap_or_default())
	});

	let selection = Signal::derive(move || {
		if let Some(id) = store
			.selected_vertex
			.with(|sel| sel.as_ref().and_then(|form| form.id.clone()))
		{
			Selection::Vertex(id)
		} else if let Some(id) = store
			.selected_edge
			.with(|sel| sel.as_ref().and_then(|form| form.id.clone()))
		{
			Selection::Edge(id)
		} else {
			Selection::None
		}
	});

	// Canvas clicks load the picked record into the matching form tab.
	let on_select = move |picked: Selection| match picked {
		Selection::Vertex(id) => {
			let form = store.graph.with_untracked(|graph| {
				graph
					.as_ref()
					.and_then(|graph| graph.vertex(&id))
					.map(FormVertex::from_vertex)
			});
			if let Some(form) = form {
				store.select_vertex(form);
				active_tab.set(EditorTab::Vertex);
			}
		}
		Selection::Edge(id) => {
			let form = store.graph.with_untracked(|graph| {
				let graph = graph.as_ref()?;
				let edge = graph.edge(&id)?;
				let source_label = graph.vertex(&edge.source)?.label.clone();
				let target_label = graph.vertex(&edge.target)?.label.clone();
				Some(FormEdge::from_edge(edge, source_label, target_label))
			});
			if let Some(form) = form {
				store.select_edge(form);
				active_tab.set(EditorTab::Edge);
			}
		}
		Selection::None => store.clear_selection(),
	};

	// Drag release persists the new position; the store only moves the vertex
	// once the server confirms.
	let on_vertex_moved = move |(id, x, y): (String, f64, f64)| {
		let request = store.graph.with_untracked(|graph| {
			graph
				.as_ref()
				.and_then(|graph| graph.vertex(&id))
				.map(|vertex| VertexRequest::moved(vertex, x, y))
		});
		let Some(request) = request else {
			return;
		};
		let pid = project_id.get_untracked();
		spawn_local(async move {
			match api::update_vertex(&pid, &id, &request).await {
				Ok(ApiOutcome::Success(response)) => store.update_vertex(Vertex::from(response)),
				Ok(outcome) => log::warn!("vertex move not persisted: {outcome:?}"),
				Err(error) => log::error!("vertex move failed: {error}"),
			}
		});
	};

	view! {
		<div class="editor-page">
			<aside class="sidebar">
				<div class="tabs">
					<button
						class="tab"
						class:active=move || active_tab.get() == EditorTab::Vertex
						on:click=move |_| active_tab.set(EditorTab::Vertex)
					>
						"Vertex"
					</button>
					<button
						class="tab"
						class:active=move || active_tab.get() == EditorTab::Edge
						on:click=move |_| active_tab.set(EditorTab::Edge)
					>
						"Edge"
					</button>
				</div>
				<div class="tab-body">
					{move || match active_tab.get() {
						EditorTab::Vertex => view! { <VertexForm project_id=project_id /> }.into_any(),
						EditorTab::Edge => view! { <EdgeForm project_id=project_id /> }.into_any(),
					}}
				</div>
			</aside>
			<main class="editor-main">
				<Toolbar project_id=project_id />
				<div class="canvas-wrap">
					<GraphCanvas
						data=canvas_data
						selection=selection
						on_select=Callback::new(on_select)
						on_vertex_moved=Callback::new(on_vertex_moved)
						center_epoch=Signal::from(store.center_epoch)
					/>
				</div>
			</main>
		</div>
	}
}
