use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api::{self, ApiOutcome};
use crate::components::property_list::{PropertyList, PropertyPatch};
use crate::components::toast::Toaster;
use crate::models::api::{VertexRequest, VertexResponse};
use crate::models::form::{FormProperty, FormVertex};
use crate::models::schema::Vertex;
use crate::store::GraphStore;

/// Sidebar form for creating, updating and deleting vertex types. With no
/// canvas selection it creates; with a selected vertex it edits that vertex.
#[component]
pub(super) fn VertexForm(#[prop(into)] project_id: Signal<String>) -> impl IntoView {
	let store = GraphStore::expect();
	let toaster = Toaster::expect();
	let form = RwSignal::new(FormVertex::empty());
	let busy = RwSignal::new(false);

	// Mirror the canvas selection into the form; clearing it resets to
	// create mode.
	Effect::new(move |_| match store.selected_vertex.get() {
		Some(selected) => form.set(selected),
		None => form.set(FormVertex::empty()),
	});

	let apply_outcome = move |outcome: ApiOutcome<VertexResponse>, created: bool| match outcome {
		ApiOutcome::Success(response) => {
			let vertex = Vertex::from(response);
			if created {
				store.add_vertex(vertex);
				toaster.success("Successfully created Vertex");
				form.set(FormVertex::empty());
			} else {
				store.update_vertex(vertex);
				toaster.success("Successfully updated Vertex");
			}
		}
		ApiOutcome::FieldErrors(errors) => form.update(|form| form.apply_field_errors(&errors)),
		ApiOutcome::GeneralError(message) => toaster.error(message),
	};

	let submit_create = move |_| {
		if busy.get_untracked() {
			return;
		}
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			// New vertices are auto-placed relative to the existing layout.
			let (x, y) = store
				.graph
				.with_untracked(|graph| graph.as_ref().map(|g| g.new_vertex_position()))
				.unwrap_or((600.0, 400.0));
			let request = VertexRequest::from_form_with_position(&form.get_untracked(), x, y);
			match api::create_vertex(&pid, &request).await {
				Ok(outcome) => apply_outcome(outcome, true),
				Err(error) => {
					log::error!("create vertex failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let submit_update = move |_| {
		let Some(vertex_id) = form.with_untracked(|form| form.id.clone()) else {
			return;
		};
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			let request = VertexRequest::from_form(&form.get_untracked());
			match api::update_vertex(&pid, &vertex_id, &request).await {
				Ok(outcome) => apply_outcome(outcome, false),
				Err(error) => {
					log::error!("update vertex failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let submit_delete = move |_| {
		let Some(vertex_id) = form.with_untracked(|form| form.id.clone()) else {
			return;
		};
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			match api::delete_vertex(&pid, &vertex_id).await {
				Ok(ApiOutcome::Success(())) => {
					store.delete_vertex(&vertex_id);
					toaster.success("Successfully deleted Vertex");
				}
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Ok(ApiOutcome::FieldErrors(_)) => toaster.error(api::UNKNOWN_ERROR),
				Err(error) => {
					log::error!("delete vertex failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let on_property_change = move |(row_id, patch): (Uuid, PropertyPatch)| {
		form.update(|form| {
			if let Some(row) = form.properties.iter_mut().find(|p| p.row_id == row_id) {
				match patch {
					PropertyPatch::Key(key) => row.key = key,
					PropertyPatch::Datatype(datatype) => row.datatype = datatype,
					PropertyPatch::Required(required) => row.required = required,
				}
				row.error.clear();
			}
		});
	};
	let on_property_remove =
		move |row_id: Uuid| form.update(|form| form.properties.retain(|p| p.row_id != row_id));

	view! {
		<div class="entity-form">
			<label class="field">
				<span>"Name"</span>
				<input
					type="text"
					prop:value=move || form.get().name
					class:invalid=move || !form.get().name_error.is_empty()
					on:input=move |ev| {
						form.update(|form| {
							form.name = event_target_value(&ev);
							form.name_error.clear();
						})
					}
				/>
				<span class="field-error">{move || form.get().name_error}</span>
			</label>

			<button
				class="button secondary"
				on:click=move |_| form.update(|form| form.properties.push(FormProperty::empty()))
			>
				"Add Property"
			</button>
			<PropertyList
				properties=Signal::derive(move || form.get().properties)
				on_change=on_property_change
				on_remove=on_property_remove
			/>

			<footer class="form-actions">
				{move || {
					if store.selected_vertex.get().is_some() {
						view! {
							<div class="button-row">
								<button
									class="button warning"
									disabled=move || busy.get()
									on:click=submit_update
								>
									"Update Vertex"
								</button>
								<button
									class="button danger"
									disabled=move || busy.get()
									on:click=submit_delete
								>
									"Delete Vertex"
								</button>
							</div>
						}
							.into_any()
					} else {
						view! {
							<button
								class="button success"
								disabled=move || busy.get()
								on:click=submit_create
							>
								"Create Vertex"
							</button>
						}
							.into_any()
					}
				}}
			</footer>
		</div>
	}
}
