use crate::api::{ApiError, SaveOpenContent, FAVORITES_KEY, LIBRARIES_KEY};
use crate::components::favorite_star::FavoriteStar;
use crate::components::hooks::{use_favorite, use_live_favorite};
use crate::components::live_status::LiveStatus;
use crate::components::ui::{Button, ButtonSize, ErrorAlert, Input, Label, Loading, Modal};
use crate::state::{AppContext, PathValue, PathValueContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

pub(crate) const FAVORITE_NAME_MAX: u32 = 100;

/// Trimmed favorite name, or the message shown under the field.
pub(crate) fn validate_favorite_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        Err("Name is required")
    } else if name.chars().count() > FAVORITE_NAME_MAX as usize {
        Err("Name must be 100 characters or fewer")
    } else {
        Ok(name.to_string())
    }
}

fn proxy_error_message(e: &ApiError) -> &'static str {
    match e {
        ApiError::NotFound => "Library not found",
        _ => "Error loading library",
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct LibraryMeta {
    id: u32,
    provider_id: u32,
}

/// Metadata usable for a save: only when it belongs to the library on screen.
fn meta_for(meta: Option<LibraryMeta>, shown: Option<u32>) -> Option<LibraryMeta> {
    meta.filter(|m| Some(m.id) == shown)
}

#[component]
pub fn LibraryViewer() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    let path_values = expect_context::<PathValueContext>();
    let params = use_params_map();

    let library_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|s| s.parse::<u32>().ok())));

    let meta: RwSignal<Option<LibraryMeta>> = RwSignal::new(None);
    let src: RwSignal<Option<String>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading = RwSignal::new(true);

    let favorite = use_favorite(false, "Library", &[FAVORITES_KEY, LIBRARIES_KEY]);

    let load_meta = move |id: u32| {
        let api_client = api.get_untracked();
        spawn_local(async move {
            match api_client.get_library(id).await {
                Ok(library) if library_id.get_untracked() == Some(id) => {
                    path_values.set_path_val(vec![PathValue::new(":library_name", library.name.clone())]);
                    meta.set(Some(LibraryMeta {
                        id,
                        provider_id: library.open_content_provider_id,
                    }));
                    favorite.reconcile(library.is_favorited.unwrap_or(false));
                }
                Ok(_) => tracing::debug!(library_id = id, "dropping metadata for a library no longer shown"),
                Err(e) => tracing::warn!(library_id = id, error = %e, "failed to load library"),
            }
        });
    };

    Effect::new(move |_| {
        let Some(id) = library_id.get() else {
            error.set(Some("Library not found".to_string()));
            loading.set(false);
            return;
        };
        loading.set(true);
        error.set(None);
        src.set(None);
        meta.set(None);
        load_meta(id);

        let api_client = api.get_untracked();
        spawn_local(async move {
            let result = api_client.resolve_library_proxy(id).await;
            if library_id.get_untracked() != Some(id) {
                return;
            }
            match result {
                Ok(url) => src.set(Some(url)),
                Err(e) => {
                    tracing::warn!(library_id = id, error = %e, "failed to resolve library proxy");
                    error.set(Some(proxy_error_message(&e).to_string()));
                }
            }
            loading.set(false);
        });
    });

    let live = use_live_favorite(favorite, move || {
        if let Some(id) = library_id.get_untracked() {
            load_meta(id);
        }
    });

    let modal_open = RwSignal::new(false);
    let favorite_name = RwSignal::new(String::new());
    let name_error: RwSignal<Option<&'static str>> = RwSignal::new(None);

    let save = move |op: SaveOpenContent| {
        let Some(m) = meta_for(meta.get_untracked(), library_id.get_untracked()) else {
            return;
        };
        let api_client = api.get_untracked();
        favorite.toggle(move |_| async move { api_client.save_open_content(m.id, &op).await });
    };

    let on_star = move |_: ()| {
        if favorite.favorited_untracked() {
            save(SaveOpenContent::Remove);
        } else {
            favorite_name.set(String::new());
            name_error.set(None);
            modal_open.set(true);
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(m) = meta_for(meta.get_untracked(), library_id.get_untracked()) else {
            return;
        };
        match validate_favorite_name(&favorite_name.get_untracked()) {
            Ok(name) => {
                modal_open.set(false);
                save(SaveOpenContent::upsert_library(m.id, &name, m.provider_id));
            }
            Err(msg) => name_error.set(Some(msg)),
        }
    };

    view! {
        <div class="flex flex-col">
            <div class="flex items-center gap-4 px-8 pb-4">
                <h1 class="text-2xl font-semibold">"Library Viewer"</h1>
                <FavoriteStar
                    class="size-6"
                    favorited=Signal::derive(move || favorite.favorited())
                    disabled=Signal::derive(move || favorite.pending() || meta.with(|m| m.is_none()))
                    on_toggle=on_star
                />
                <LiveStatus live=live />
            </div>
            <div class="w-full pt-4">
                {move || {
                    if loading.get() {
                        view! { <Loading class="h-screen" /> }.into_any()
                    } else if let Some(src) = src.get() {
                        view! {
                            <iframe
                                id="library-viewer"
                                class="h-screen w-full pt-4"
                                sandbox="allow-scripts allow-same-origin"
                                src=src
                            />
                        }
                            .into_any()
                    } else {
                        let message = error.get().unwrap_or_else(|| "Error loading library".to_string());
                        view! { <div class="px-8"><ErrorAlert message=message /></div> }.into_any()
                    }
                }}
            </div>

            <Modal open=modal_open title="Add Favorite">
                <form class="flex flex-col gap-4" on:submit=on_submit>
                    <Label html_for="favorite-name" required=true>"Favorite Name"</Label>
                    <Input
                        id="favorite-name"
                        bind_value=favorite_name
                        required=true
                        autofocus=true
                        maxlength=FAVORITE_NAME_MAX
                        invalid=Signal::derive(move || name_error.with(|e| e.is_some()))
                    />
                    {move || name_error.get().map(|msg| view! { <p class="text-xs text-destructive">{msg}</p> })}
                    <div class="flex justify-end">
                        <Button size=ButtonSize::Sm>"Submit"</Button>
                    </div>
                </form>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_of_previous_library_is_not_used_for_saves() {
        let old = LibraryMeta { id: 3, provider_id: 1 };
        assert_eq!(meta_for(Some(old), Some(3)), Some(old));
        assert_eq!(meta_for(Some(old), Some(4)), None);
        assert_eq!(meta_for(None, Some(4)), None);
        assert_eq!(meta_for(Some(old), None), None);
    }

    #[test]
    fn test_validate_favorite_name() {
        assert_eq!(validate_favorite_name("  Wikipedia  "), Ok("Wikipedia".to_string()));
        assert_eq!(validate_favorite_name("   "), Err("Name is required"));
        assert!(validate_favorite_name(&"x".repeat(FAVORITE_NAME_MAX as usize)).is_ok());
        assert!(validate_favorite_name(&"x".repeat(FAVORITE_NAME_MAX as usize + 1)).is_err());
    }

    #[test]
    fn test_proxy_error_message() {
        assert_eq!(proxy_error_message(&ApiError::NotFound), "Library not found");
        assert_eq!(
            proxy_error_message(&ApiError::Network("offline".into())),
            "Error loading library"
        );
    }
}
