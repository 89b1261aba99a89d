//! Editable list of property rows shared by the vertex and edge forms.

use leptos::prelude::*;
use uuid::Uuid;

use crate::models::form::FormProperty;
use crate::models::schema::Datatype;

/// A single-field edit to one property row, addressed by its row id.
#[derive(Clone, Debug)]
pub enum PropertyPatch {
	Key(String),
	Datatype(Datatype),
	Required(bool),
}

#[component]
pub fn PropertyList(
	#[prop(into)] properties: Signal<Vec<FormProperty>>,
	#[prop(into)] on_change: Callback<(Uuid, PropertyPatch)>,
	#[prop(into)] on_remove: Callback<Uuid>,
) -> impl IntoView {
	view! {
		<div class="property-list">
			<For
				each=move || properties.get()
				key=|property| property.row_id
				children=move |property: FormProperty| {
					let row_id = property.row_id;
					// Rows are keyed by id; read the live row so error slots
					// filled by a 422 response show up without re-keying.
					let row = Memo::new(move |_| {
						properties.with(|all| {
							all.iter()
								.find(|p| p.row_id == row_id)
								.cloned()
								.unwrap_or_else(FormProperty::empty)
						})
					});

					view! {
						<div class="property-row">
							<label class="field">
								<input
									type="text"
									placeholder="Key"
									prop:value=move || row.get().key
									class:invalid=move || !row.get().error.is_empty()
									on:input=move |ev| {
										on_change.run((row_id, PropertyPatch::Key(event_target_value(&ev))))
									}
								/>
								<span class="field-error">{move || row.get().error}</span>
							</label>
							<select on:change=move |ev| {
								let datatype = event_target_value(&ev).parse().unwrap_or_default();
								on_change.run((row_id, PropertyPatch::Datatype(datatype)))
							}>
								{Datatype::ALL
									.iter()
									.map(|datatype| {
										let datatype = *datatype;
										view! {
											<option
												value=datatype.as_str()
												selected=move || row.get().datatype == datatype
											>
												{datatype.as_str()}
											</option>
										}
									})
									.collect_view()}
							</select>
							<label
								class="toggle"
								title=move || if row.get().required { "Required" } else { "Optional" }
							>
								<input
									type="checkbox"
									prop:checked=move || row.get().required
									on:change=move |ev| {
										on_change.run((row_id, PropertyPatch::Required(event_target_checked(&ev))))
									}
								/>
								"Required"
							</label>
							<button class="button danger" on:click=move |_| on_remove.run(row_id)>
								"Remove"
							</button>
						</div>
					}
				}
			/>
		</div>
	}
}
