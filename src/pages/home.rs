use leptos::prelude::*;

/// Landing page.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="home">
			<h1 class="home-title">"Graphsmith"</h1>
			<p class="home-subtitle">
				"Craft graph-database schemas visually: model vertex and edge types with typed properties, then build a running, queryable service from your design."
			</p>
			<a class="button primary" href="/projects">
				"Build Project"
			</a>
		</div>
	}
}
