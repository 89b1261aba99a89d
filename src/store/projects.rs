//! Reactive store for the project list page.

use leptos::prelude::*;

use crate::models::schema::Project;

#[derive(Clone, Copy)]
pub struct ProjectStore {
	/// `None` while the initial fetch is still in flight.
	pub projects: RwSignal<Option<Vec<Project>>>,
}

impl ProjectStore {
	pub fn new() -> Self {
		ProjectStore {
			projects: RwSignal::new(None),
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

	pub fn set(&self, projects: Vec<Project>) {
		self.projects.set(Some(projects));
	}

	/// Newly created projects go to the front of the list.
	pub fn add(&self, project: Project) {
		self.projects.update(|projects| {
			projects.get_or_insert_with(Vec::new).insert(0, project);
		});
	}

	pub fn remove(&self, project_id: &str) {
		self.projects.update(|projects| {
			if let Some(projects) = projects {
				projects.retain(|p| p.id != project_id);
			}
		});
	}
}

impl Default for ProjectStore {
	fn default() -> Self {
		Self::new()
	}
}
