use crate::components::favorite_star::FavoriteStar;
use crate::models::CombinedFavorite;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn FavoriteCard(
    favorite: CombinedFavorite,
    #[prop(into)] on_unfavorite: Callback<()>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());
    let target = StoredValue::new(favorite.navigation_target());
    let disabled = favorite.is_disabled;

    let class = if disabled {
        "relative w-56 cursor-not-allowed rounded-lg border bg-muted p-3 opacity-70 shadow-sm"
    } else {
        "relative w-56 cursor-pointer rounded-lg border bg-card p-3 shadow-sm transition-all hover:scale-105 hover:shadow-md"
    };

    view! {
        <div
            class=class
            aria-disabled=disabled.to_string()
            on:click=move |_| {
                if let Some(path) = target.get_value() {
                    navigate.with_value(|nav| nav(&path, Default::default()));
                }
            }
        >
            <div class="absolute right-2 top-2">
                <FavoriteStar favorited=true disabled=busy on_toggle=on_unfavorite />
            </div>
            <figure class="mx-auto w-1/2">
                <img class="mb-3 h-28 w-full rounded-md object-contain" src=favorite.thumbnail_url.clone() alt=favorite.name.clone() />
            </figure>
            <h3 class="mb-1 text-center text-base font-bold">{favorite.name.clone()}</h3>
            <p class="text-center text-sm text-muted-foreground">{favorite.subtitle().to_string()}</p>
        </div>
    }
}
