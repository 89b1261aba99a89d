//! Modal dialog shell shared by the create-project, delete-project and build
//! dialogs.

use leptos::prelude::*;

#[component]
pub fn Modal(
	#[prop(into)] open: Signal<bool>,
	#[prop(into)] title: String,
	#[prop(into)] on_close: Callback<()>,
	children: Children,
) -> impl IntoView {
	view! {
		<div
			class="modal-backdrop"
			style:display=move || if open.get() { "flex" } else { "none" }
			on:mousedown=move |_| on_close.run(())
		>
			<div class="modal" on:mousedown=|ev| ev.stop_propagation()>
				<h2 class="modal-title">{title}</h2>
				{children()}
			</div>
		</div>
	}
}
