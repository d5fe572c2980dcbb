use crate::api::{ApiResult, ServerResponseMany};
use crate::components::hooks::use_fetch;
use crate::components::pagination::Pagination;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert, Loading};
use crate::models::UserRole;
use crate::pages::listing_controls::ListingControls;
use crate::state::listing::{
    effective_role, effective_visibility, is_management_route, ListingKind, ListingQuery,
};
use crate::state::AppContext;
use crate::util::dedup_last_wins;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use serde::de::DeserializeOwned;

/// A row of a paginated listing endpoint.
pub(crate) trait ListingItem: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ListingKind;

    fn id(&self) -> u32;

    /// `<For>` key. Carries the flags a refetch may flip so the card re-renders.
    fn row_key(&self) -> (u32, bool, bool);

    fn card(self, role: UserRole) -> AnyView;
}

/// Listing page with one row per id; a repeated id keeps its last occurrence.
pub(crate) fn decode_listing<T: ListingItem>(v: serde_json::Value) -> ApiResult<ServerResponseMany<T>> {
    let mut resp = ServerResponseMany::<T>::from_value(v)?;
    resp.data = dedup_last_wins(resp.data, |item| item.id());
    Ok(resp)
}

/// Search/filter controls, card grid and pagination for one listing kind.
pub(crate) fn listing_grid<T: ListingItem>(
    student_view: bool,
    placeholder: &'static str,
    grid_class: &'static str,
) -> impl IntoView {
    let current_user = expect_context::<AppContext>().0.current_user;
    let location = use_location();

    let query = RwSignal::new(ListingQuery::default());
    let role = Signal::derive(move || current_user.with(|u| u.as_ref().map(|u| u.role).unwrap_or_default()));
    let management = Signal::derive(move || is_management_route(&location.pathname.get()));
    let show_visibility = Signal::derive(move || role.get().is_admin() && management.get() && !student_view);

    let items = use_fetch(
        move || {
            let visibility = effective_visibility(
                role.get(),
                management.get() && !student_view,
                query.with(|q| q.visibility),
            );
            query.with(|q| Some(q.key(T::KIND, visibility)))
        },
        move || query.with(|q| q.revision),
        decode_listing::<T>,
    );

    let card_role = move || -> UserRole { effective_role(role.get(), student_view, management.get()) };

    view! {
        <div class="flex flex-col gap-6">
            <ListingControls
                query=query
                show_visibility=show_visibility
                show_categories=T::KIND.filters_by_category()
                placeholder=placeholder
            />
            {move || items.error.get().map(|e| view! {
                <div class="flex flex-col items-start gap-2">
                    <ErrorAlert message=e.user_message() />
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| items.revalidate()>
                        "Retry"
                    </Button>
                </div>
            })}
            <Show when=move || items.loading.get() && items.data.with(|d| d.is_none()) fallback=|| ().into_view()>
                <Loading />
            </Show>
            <div class=format!("grid grid-cols-1 gap-6 sm:grid-cols-2 {grid_class}")>
                <For
                    each=move || items.data.get().map(|r| r.data).unwrap_or_default()
                    key=|item: &T| item.row_key()
                    children=move |item: T| item.card(card_role())
                />
            </div>
            <Show
                when=move || !items.loading.get() && items.error.with(|e| e.is_none())
                fallback=|| ().into_view()
            >
                <div class="flex justify-center">
                    <Pagination
                        meta=Signal::derive(move || items.data.with(|d| d.as_ref().map(|r| r.meta).unwrap_or_default()))
                        on_page=move |p: u32| query.update(|q| q.set_page(p))
                        on_per_page=move |n: u32| query.update(|q| q.set_per_page(n))
                    />
                </div>
            </Show>
        </div>
    }
}
