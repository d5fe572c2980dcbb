use crate::api::ApiClient;
use crate::components::ui::{Card, CardContent, CardDescription, CardTitle};
use crate::models::HelpfulLink;
use crate::state::{ToastContext, ToastState};
use crate::util::open_in_new_tab;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Resource link. Clicks go through `on_open` so the visit can be counted.
#[component]
pub fn HelpfulLinkCard(link: HelpfulLink, #[prop(into)] on_open: Callback<u32>) -> impl IntoView {
    let id = link.id;

    view! {
        <a
            href=link.url.clone()
            target="_blank"
            rel="noopener noreferrer"
            class="block w-64 shrink-0 no-underline"
            on:click=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                on_open.run(id);
            }
        >
            <Card class="h-full hover:shadow-md">
                {link.thumbnail_url.map(|src| view! {
                    <img class="h-24 w-full object-cover" src=src alt="" />
                })}
                <CardContent>
                    <CardTitle>{link.title}</CardTitle>
                    <CardDescription>{link.description}</CardDescription>
                </CardContent>
            </Card>
        </a>
    }
}

/// Count the visit, then open the URL the backend hands back in a new tab.
pub(crate) fn open_helpful_link(api_client: ApiClient, toast: ToastContext, id: u32) {
    spawn_local(async move {
        match api_client.record_helpful_link_activity(id).await {
            Ok(url) if !url.is_empty() => open_in_new_tab(&url),
            Ok(_) => tracing::warn!(link_id = id, "activity response carried no url"),
            Err(e) => {
                tracing::warn!(link_id = id, error = %e, "helpful link activity failed");
                toast.toaster(e.user_message(), ToastState::Error);
            }
        }
    });
}
