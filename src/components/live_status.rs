use crate::components::hooks::LiveFavorite;
use crate::live::ChannelStatus;
use leptos::prelude::*;

/// Small dot next to the favorite star. Only speaks up once the channel has
/// been down long enough that the star may be out of date.
#[component]
pub fn LiveStatus(live: LiveFavorite) -> impl IntoView {
    let dot = move || match (live.status.get(), live.stale.get()) {
        (ChannelStatus::Open, _) => "bg-green-500",
        (_, true) => "bg-destructive",
        _ => "bg-muted-foreground",
    };

    view! {
        <span
            class="inline-flex items-center gap-1.5 text-xs text-muted-foreground"
            data-status=move || live.status.get().as_ref().to_string()
        >
            <span class=move || format!("size-2 rounded-full {}", dot()) />
            <Show when=move || live.stale.get() fallback=|| ().into_view()>
                "Live updates paused, reconnecting"
            </Show>
        </span>
    }
}
