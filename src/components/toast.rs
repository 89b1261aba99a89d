//! Toast notifications: the only error surface for general and transport
//! failures.

use std::time::Duration;

use leptos::prelude::*;

const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
	Success,
	Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub kind: ToastKind,
	pub message: String,
}

/// Context handle for pushing toasts from anywhere in the tree.
#[derive(Clone, Copy)]
pub struct Toaster {
	toasts: RwSignal<Vec<Toast>>,
	next_id: RwSignal<u64>,
}

impl Toaster {
	pub fn provide() -> Self {
		let toaster = Toaster {
			toasts: RwSignal::new(vec![]),
			next_id: RwSignal::new(0),
		};
		provide_context(toaster);
		toaster
	}

	pub fn expect() -> Self {
		expect_context()
	}

	pub fn success(&self, message: impl Into<String>) {
		self.push(ToastKind::Success, message.into());
	}

	pub fn error(&self, message: impl Into<String>) {
		self.push(ToastKind::Error, message.into());
	}

	fn push(&self, kind: ToastKind, message: String) {
		let id = self.next_id.get_untracked();
		self.next_id.set(id + 1);
		self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

		let toaster = *self;
		set_timeout(move || toaster.dismiss(id), DISMISS_AFTER);
	}

	fn dismiss(&self, id: u64) {
		self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
	}
}

/// Renders the active toasts; a click dismisses early.
#[component]
pub fn ToastTray() -> impl IntoView {
	let toaster = Toaster::expect();

	view! {
		<div class="toast-tray">
			<For
				each=move || toaster.toasts.get()
				key=|toast| toast.id
				children=move |toast: Toast| {
					let class = match toast.kind {
						ToastKind::Success => "toast toast-success",
						ToastKind::Error => "toast toast-error",
					};
					let id = toast.id;
					view! {
						<div class=class on:click=move |_| toaster.dismiss(id)>
							{toast.message.clone()}
						</div>
					}
				}
			/>
		</div>
	}
}
