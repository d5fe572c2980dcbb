use crate::state::tabs::OpenContentTab;
use leptos::prelude::*;
use strum::IntoEnumIterator;

#[component]
pub fn TabView(
    #[prop(into)] active: Signal<OpenContentTab>,
    #[prop(into)] on_select: Callback<OpenContentTab>,
) -> impl IntoView {
    view! {
        <div class="flex gap-6 border-b" role="tablist">
            {OpenContentTab::iter()
                .map(|tab| {
                    let is_active = move || active.get() == tab;
                    view! {
                        <button
                            type="button"
                            role="tab"
                            aria-selected=move || is_active().to_string()
                            class=move || {
                                if is_active() {
                                    "-mb-px border-b-2 border-primary px-1 pb-2 text-sm font-medium text-foreground"
                                } else {
                                    "-mb-px border-b-2 border-transparent px-1 pb-2 text-sm text-muted-foreground hover:text-foreground"
                                }
                            }
                            on:click=move |_| {
                                if !is_active() {
                                    on_select.run(tab);
                                }
                            }
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
