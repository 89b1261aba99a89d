//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod models;
mod pages;
mod store;

use crate::components::toast::{ToastTray, Toaster};
use crate::pages::editor::EditorPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::projects::ProjectsPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the landing page, the project list, the
/// per-project schema editor, and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	// Toasts are the app-wide error/success surface.
	Toaster::provide();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Graphsmith" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/projects") view=ProjectsPage />
				<Route path=path!("/projects/:id") view=EditorPage />
			</Routes>
		</Router>
		<ToastTray />
	}
}
