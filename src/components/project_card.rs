//! Project tile with a read-only mini preview of its schema graph.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiOutcome};
use crate::components::graph_canvas::{CanvasGraph, GraphCanvas};
use crate::models::schema::{Graph, Project};

#[component]
pub fn ProjectCard(project: Project, #[prop(into)] on_delete: Callback<Project>) -> impl IntoView {
	let preview: RwSignal<Option<CanvasGraph>> = RwSignal::new(None);

	let project_id = project.id.clone();
	spawn_local(async move {
		match api::fetch_graph(&project_id).await {
			Ok(ApiOutcome::Success(response)) => {
				preview.set(Some(CanvasGraph::from(&Graph::from(response))));
			}
			// The card stays a skeleton; errors are not worth a toast here.
			Ok(_) => {}
			Err(error) => log::error!("preview fetch for {project_id} failed: {error}"),
		}
	});

	let edit_href = format!("/projects/{}", project.id);
	let deleted = project.clone();

	view! {
		<div class="project-card">
			<header class="project-card-header">
				<h2>{project.name.clone()}</h2>
				<div class="project-card-actions">
					<a href=edit_href class="button primary">
						"Edit"
					</a>
					<button class="button danger" on:click=move |_| on_delete.run(deleted.clone())>
						"Delete"
					</button>
				</div>
			</header>
			<div class="project-card-preview">
				{move || match preview.get() {
					Some(graph) => {
						view! {
							<GraphCanvas
								data=Signal::derive(move || graph.clone())
								interactive=false
							/>
						}
							.into_any()
					}
					None => view! { <div class="skeleton"></div> }.into_any(),
				}}
			</div>
		</div>
	}
}
