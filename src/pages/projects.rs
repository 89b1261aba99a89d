//! Project list: cards with mini previews, a create dialog and a delete
//! confirmation dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiOutcome};
use crate::components::modal::Modal;
use crate::components::project_card::ProjectCard;
use crate::components::toast::Toaster;
use crate::models::api::ProjectRequest;
use crate::models::form::FormProject;
use crate::models::schema::Project;
use crate::store::ProjectStore;

#[component]
pub fn ProjectsPage() -> impl IntoView {
	let toaster = Toaster::expect();
	let store = ProjectStore::provide();

	spawn_local(async move {
		match api::fetch_projects().await {
			Ok(ApiOutcome::Success(responses)) => {
				store.set(responses.into_iter().map(Project::from).collect());
			}
			Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
			Ok(ApiOutcome::FieldErrors(_)) => toaster.error(api::UNKNOWN_ERROR),
			Err(error) => {
				log::error!("project list fetch failed: {error}");
				toaster.error(api::INTERNAL_SERVER_ERROR);
			}
		}
	});

	let create_open = RwSignal::new(false);
	let create_form = RwSignal::new(FormProject::empty());
	let pending_delete: RwSignal<Option<Project>> = RwSignal::new(None);
	let delete_output = RwSignal::new(false);
	let busy = RwSignal::new(false);

	let submit_create = move |_| {
		if busy.get_untracked() {
			return;
		}
		busy.set(true);
		spawn_local(async move {
			let request = ProjectRequest::from_form(&create_form.get_untracked());
			match api::create_project(&request).await {
				Ok(ApiOutcome::Success(response)) => {
					store.add(Project::from(response));
					toaster.success("Successfully created Project");
					create_form.set(FormProject::empty());
					create_open.set(false);
				}
				Ok(ApiOutcome::FieldErrors(errors)) => {
					create_form.update(|form| form.apply_field_errors(&errors));
				}
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Err(error) => {
					log::error!("create project failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	let submit_delete = move |_| {
		let Some(project) = pending_delete.get_untracked() else {
			return;
		};
		busy.set(true);
		spawn_local(async move {
			match api::delete_project(&project.id, delete_output.get_untracked()).await {
				Ok(ApiOutcome::Success(())) => {
					store.remove(&project.id);
					toaster.success("Successfully deleted Project");
					pending_delete.set(None);
					delete_output.set(false);
				}
				Ok(ApiOutcome::GeneralError(message)) => toaster.error(message),
				Ok(ApiOutcome::FieldErrors(_)) => toaster.error(api::UNKNOWN_ERROR),
				Err(error) => {
					log::error!("delete project failed: {error}");
					toaster.error(api::INTERNAL_SERVER_ERROR);
				}
			}
			busy.set(false);
		});
	};

	view! {
		<div class="projects-page">
			<header class="page-header">
				<h1>"Projects"</h1>
				<button class="button primary" on:click=move |_| create_open.set(true)>
					"New Project"
				</button>
			</header>

			{move || match store.projects.get() {
				None => view! { <p class="placeholder">"Loading projects..."</p> }.into_any(),
				Some(projects) if projects.is_empty() => {
					view! { <p class="placeholder">"No projects yet. Create one to get started."</p> }
						.into_any()
				}
				Some(_) => {
					view! {
						<div class="project-grid">
							<For
								each=move || store.projects.get().unwrap_or_default()
								key=|project| project.id.clone()
								children=move |project: Project| {
									view! {
										<ProjectCard
											project=project
											on_delete=move |project: Project| {
												pending_delete.set(Some(project))
											}
										/>
									}
								}
							/>
						</div>
					}
						.into_any()
				}
			}}

			<Modal
				open=create_open
				title="Create Project"
				on_close=move |_| create_open.set(false)
			>
				<label class="field">
					<span>"Name"</span>
					<input
						type="text"
						prop:value=move || create_form.get().name
						class:invalid=move || !create_form.get().name_error.is_empty()
						on:input=move |ev| {
							create_form
								.update(|form| {
									form.name = event_target_value(&ev);
									form.name_error.clear();
								})
						}
					/>
					<span class="field-error">{move || create_form.get().name_error}</span>
				</label>
				<footer class="modal-actions">
					<button class="button" on:click=move |_| create_open.set(false)>
						"Close"
					</button>
					<button class="button success" disabled=move || busy.get() on:click=submit_create>
						"Create"
					</button>
				</footer>
			</Modal>

			<Modal
				open=Signal::derive(move || pending_delete.get().is_some())
				title="Delete Project"
				on_close=move |_| pending_delete.set(None)
			>
				<p>
					{move || {
						pending_delete
							.get()
							.map(|project| format!("Delete project \"{}\"?", project.name))
							.unwrap_or_default()
					}}
				</p>
				<label class="toggle">
					<input
						type="checkbox"
						prop:checked=move || delete_output.get()
						on:change=move |ev| delete_output.set(event_target_checked(&ev))
					/>
					"Also delete the build output"
				</label>
				<footer class="modal-actions">
					<button class="button" on:click=move |_| pending_delete.set(None)>
						"Close"
					</button>
					<button class="button danger" disabled=move || busy.get() on:click=submit_delete>
						"Delete"
					</button>
				</footer>
			</Modal>
		</div>
	}
}
