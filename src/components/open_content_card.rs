use crate::components::ui::CardRow;
use crate::models::OpenContentItem;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Compact row for dashboard lists. Disabled content is shown but inert.
#[component]
pub fn OpenContentCard(content: OpenContentItem) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());
    let disabled = content.is_disabled;
    let path = StoredValue::new(content.content_type.viewer_path(content.content_id));
    let subtitle = content
        .channel_title
        .clone()
        .or_else(|| content.provider_name.clone())
        .unwrap_or_default();

    view! {
        <CardRow
            class=if disabled { "cursor-not-allowed bg-muted opacity-70" } else { "cursor-pointer hover:shadow-md" }
            on:click=move |_| {
                if !disabled {
                    navigate.with_value(|nav| nav(&path.get_value(), Default::default()));
                }
            }
        >
            <img class="size-10 shrink-0 rounded object-cover" src=content.thumbnail_url.unwrap_or_default() alt="" />
            <div class="min-w-0">
                <h3 class="truncate text-sm font-medium">{content.name}</h3>
                <p class="truncate text-xs text-muted-foreground">{subtitle}</p>
            </div>
        </CardRow>
    }
}
