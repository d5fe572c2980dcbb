use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// One `<option>`: visible label and the value written back on change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectChoice {
    pub label: String,
    pub value: String,
}

impl SelectChoice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Native `<select>`; reports the chosen value through `on_change`.
#[component]
pub fn NativeSelect(
    #[prop(into)] choices: Signal<Vec<SelectChoice>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] aria_label: String,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input h-9 rounded-md border bg-transparent px-3 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let handle_change = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            on_change.run(select.value());
        }
    };

    view! {
        <select data-name="NativeSelect" class=merged_class aria-label=aria_label on:change=handle_change>
            {move || {
                let selected = value.get();
                choices
                    .get()
                    .into_iter()
                    .map(|c| {
                        let is_selected = c.value == selected;
                        view! {
                            <option value=c.value selected=is_selected>{c.label}</option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
