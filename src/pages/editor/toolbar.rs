use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiOutcome};
use crate::components::modal::Modal;
use crate::components::toast::Toaster;
use crate::models::api::BuildRequest;
use crate::models::form::FormBuild;
use crate::store::GraphStore;

/// Editor toolbar: re-center the canvas and open the build dialog.
#[component]
pub(super) fn Toolbar(#[prop(into)] project_id: Signal<String>) -> impl IntoView {
	let store = GraphStore::expect();
	let toaster = Toaster::expect();
	let build_open = RwSignal::new(false);
	let build_form = RwSignal::new(FormBuild::empty());
	let building = RwSignal::new(false);

	let submit_build = move |_| {
		if building.get_untracked() {
			return;
		}
		building.set(true);
		let pid = project_id.get_untracked();
		spawn_local(async move {
			let request = BuildRequest::from_form(&build_form.get_untracked());
			match api::build_project(&pid, &request).await {
				Ok(ApiOutcome::Success(())) => {
					toaster.success("Project successfully built");
					build_open.set(false);
				}
				Ok(ApiOutcome::FieldErrors(errors)) => {
					build_form.update(|form| form.apply_field_errors(&errors));
				}
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Err(error) => {
					log::error!("build failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			building.set(false);
		});
	};

	view! {
		<div class="toolbar">
			<button
				class="button"
				disabled=move || store.graph.get().is_none()
				on:click=move |_| store.center_graph()
			>
				"Center"
			</button>
			<button
				class="button success"
				disabled=move || store.graph.get().is_none()
				on:click=move |_| build_open.set(true)
			>
				"Build"
			</button>

			<Modal open=build_open title="Build Project" on_close=move |_| build_open.set(false)>
				<label class="field">
					<span>"Port"</span>
					<input
						type="number"
						prop:value=move || build_form.get().port.to_string()
						class:invalid=move || !build_form.get().port_error.is_empty()
						on:input=move |ev| {
							build_form
								.update(|form| {
									form.port = event_target_value(&ev).parse().unwrap_or(0);
									form.port_error.clear();
								})
						}
					/>
					<span class="field-error">{move || build_form.get().port_error}</span>
				</label>
				<label class="field">
					<span>"Volume (optional)"</span>
					<input
						type="text"
						prop:value=move || build_form.get().volume
						class:invalid=move || !build_form.get().volume_error.is_empty()
						on:input=move |ev| {
							build_form
								.update(|form| {
									form.volume = event_target_value(&ev);
									form.volume_error.clear();
								})
						}
					/>
					<span class="field-error">{move || build_form.get().volume_error}</span>
				</label>
				<footer class="modal-actions">
					<button class="button" on:click=move |_| build_open.set(false)>
						"Close"
					</button>
					<button class="button success" disabled=move || building.get() on:click=submit_build>
						"Build"
					</button>
				</footer>
			</Modal>
		</div>
	}
}
