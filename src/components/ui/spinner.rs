use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Full-width placeholder shown while a page's first fetch is in flight.
#[component]
pub fn Loading(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("flex w-full items-center justify-center gap-3 py-16", class);

    view! {
        <div class=merged_class>
            <Spinner class="size-6" />
            <p class="text-sm text-muted-foreground">"Loading..."</p>
        </div>
    }
}
