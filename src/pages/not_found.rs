use leptos::prelude::*;

/// 404 fallback.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="home">
			<h1 class="home-title">"404"</h1>
			<p class="home-subtitle">"This page does not exist."</p>
			<a class="button primary" href="/">
				"Back home"
			</a>
		</div>
	}
}
