use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api::{self, ApiOutcome};
use crate::components::property_list::{PropertyList, PropertyPatch};
use crate::components::toast::Toaster;
use crate::models::api::{EdgeRequest, EdgeResponse};
use crate::models::form::{FormEdge, FormProperty};
use crate::models::schema::Edge;
use crate::store::GraphStore;

/// Sidebar form for creating, updating and deleting edge types. Endpoints are
/// picked by vertex label and resolved to ids on submit.
#[component]
pub(super) fn EdgeForm(#[prop(into)] project_id: Signal<String>) -> impl IntoView {
	let store = GraphStore::expect();
	let toaster = Toaster::expect();
	let form = RwSignal::new(FormEdge::empty());
	let busy = RwSignal::new(false);
	let source_missing = RwSignal::new(false);
	let target_missing = RwSignal::new(false);

	Effect::new(move |_| match store.selected_edge.get() {
		Some(selected) => form.set(selected),
		None => form.set(FormEdge::empty()),
	});

	let vertex_labels = Signal::derive(move || {
		store.graph.with(|graph| {
			graph
				.as_ref()
				.map(|g| g.vertices.iter().map(|v| v.label.clone()).collect::<Vec<_>>())
				.unwrap_or_default()
		})
	});

	// Labels are what the form shows; submission needs the vertex ids. A
	// label that no longer resolves flags its select as required.
	let resolve_endpoints = move || {
		let (source_label, target_label) =
			form.with_untracked(|form| (form.source_label.clone(), form.target_label.clone()));
		let (source, target) = store.graph.with_untracked(|graph| {
			let lookup = |label: &str| {
				graph
					.as_ref()
					.and_then(|g| g.vertex_by_label(label))
					.map(|v| v.id.clone())
			};
			(lookup(&source_label), lookup(&target_label))
		});
		source_missing.set(source.is_none());
		target_missing.set(target.is_none());
		match (source, target) {
			(Some(source), Some(target)) => Some((source, target)),
			_ => None,
		}
	};

	let apply_outcome = move |outcome: ApiOutcome<EdgeResponse>, created: bool| match outcome {
		ApiOutcome::Success(response) => {
			let edge = Edge::from(response);
			if created {
				store.add_edge(edge);
				toaster.success("Successfully created Edge");
				form.set(FormEdge::empty());
			} else {
				store.update_edge(edge);
				toaster.success("Successfully updated Edge");
			}
		}
		ApiOutcome::FieldErrors(errors) => form.update(|form| form.apply_field_errors(&errors)),
		ApiOutcome::GeneralError(message) => toaster.error(message),
	};

	let submit_create = move |_| {
		if busy.get_untracked() {
			return;
		}
		let Some((source, target)) = resolve_endpoints() else {
			return;
		};
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			let request = EdgeRequest::from_form(&form.get_untracked(), source, target);
			match api::create_edge(&pid, &request).await {
				Ok(outcome) => apply_outcome(outcome, true),
				Err(error) => {
					log::error!("create edge failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let submit_update = move |_| {
		let Some(edge_id) = form.with_untracked(|form| form.id.clone()) else {
			return;
		};
		let Some((source, target)) = resolve_endpoints() else {
			return;
		};
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			let request = EdgeRequest::from_form(&form.get_untracked(), source, target);
			match api::update_edge(&pid, &edge_id, &request).await {
				Ok(outcome) => apply_outcome(outcome, false),
				Err(error) => {
					log::error!("update edge failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let submit_delete = move |_| {
		let Some(edge_id) = form.with_untracked(|form| form.id.clone()) else {
			return;
		};
		busy.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			match api::delete_edge(&pid, &edge_id).await {
				Ok(ApiOutcome::Success(())) => {
					store.delete_edge(&edge_id);
					toaster.success("Successfully deleted Edge");
				}
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Ok(ApiOutcome::FieldErrors(_)) => toaster.error(api::UNKNOWN_ERROR),
				Err(error) => {
					log::error!("delete edge failed: {error}");
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

	let endpoint_options = move |current: String| {
		vertex_labels
			.get()
			.into_iter()
			.map(|label| {
				let is_selected = label == current;
				view! {
					<option value=label.clone() selected=is_selected>
						{label.clone()}
					</option>
				}
			})
			.collect_view()
	};

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

			<label class="field">
				<span>"Source"</span>
				<select
					class:invalid=move || source_missing.get()
					on:change=move |ev| {
						source_missing.set(false);
						form.update(|form| form.source_label = event_target_value(&ev));
					}
				>
					<option value="" disabled=true selected=move || form.get().source_label.is_empty()>
						"Select a vertex"
					</option>
					{move || endpoint_options(form.get().source_label)}
				</select>
				<span class="field-error">
					{move || if source_missing.get() { "Required" } else { "" }}
				</span>
			</label>

			<label class="field">
				<span>"Target"</span>
				<select
					class:invalid=move || target_missing.get()
					on:change=move |ev| {
						target_missing.set(false);
						form.update(|form| form.target_label = event_target_value(&ev));
					}
				>
					<option value="" disabled=true selected=move || form.get().target_label.is_empty()>
						"Select a vertex"
					</option>
					{move || endpoint_options(form.get().target_label)}
				</select>
				<span class="field-error">
					{move || if target_missing.get() { "Required" } else { "" }}
				</span>
			</label>

			<label class="toggle">
				<input
					type="checkbox"
					prop:checked=move || form.get().multi_edge
					on:change=move |ev| {
						form.update(|form| form.multi_edge = event_target_checked(&ev))
					}
				/>
				"Multi edge"
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
					if store.selected_edge.get().is_some() {
						view! {
							<div class="button-row">
								<button
									class="button warning"
									disabled=move || busy.get()
									on:click=submit_update
								>
									"Update Edge"
								</button>
								<button
									class="button danger"
									disabled=move || busy.get()
									on:click=submit_delete
								>
									"Delete Edge"
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
								"Create Edge"
							</button>
						}
							.into_any()
					}
				}}
			</footer>
		</div>
	}
}
