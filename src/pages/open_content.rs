use crate::components::resources_sidebar::ResourcesSideBar;
use crate::components::tab_view::TabView;
use crate::components::ui::button::{Button, ButtonVariant};
use crate::pages::favorites::FavoritesPage;
use crate::pages::library_layout::LibraryLayout;
use crate::pages::video_layout::VideoLayout;
use crate::state::listing::is_management_route;
use crate::state::tabs::OpenContentTab;
use crate::state::{AppContext, PathValue, PathValueContext};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

const STUDENT_BASE: &str = "/open-content";
const MANAGEMENT_BASE: &str = "/open-content-management";

/// Student view of open content. Admins landing here are previewing and get a
/// way back to the management screens.
#[component]
pub fn OpenContentPage() -> impl IntoView {
    let is_admin = {
        let app_state = expect_context::<AppContext>();
        Signal::derive(move || app_state.0.role().is_some_and(|r| r.is_admin()))
    };

    view! {
        <div class="flex flex-row">
            <div class="min-w-0 flex-1">
                <OpenContentShell
                    title="Open Content"
                    base=STUDENT_BASE
                    switch_label="Return to Admin View"
                    switch_base=MANAGEMENT_BASE
                    show_switch=is_admin
                />
            </div>
            <ResourcesSideBar />
        </div>
    }
}

#[component]
pub fn OpenContentManagementPage() -> impl IntoView {
    view! {
        <OpenContentShell
            title="Open Content Management"
            base=MANAGEMENT_BASE
            switch_label="Preview Student View"
            switch_base=STUDENT_BASE
            show_switch=true
        />
    }
}

#[component]
fn OpenContentShell(
    title: &'static str,
    base: &'static str,
    switch_label: &'static str,
    switch_base: &'static str,
    #[prop(into)] show_switch: Signal<bool>,
) -> impl IntoView {
    let cache = expect_context::<AppContext>().0.cache;
    let path_values = expect_context::<PathValueContext>();
    let navigate = StoredValue::new(use_navigate());
    let location = use_location();

    let active = Memo::new(move |_| OpenContentTab::from_path(&location.pathname.get()));
    let student_view = Memo::new(move |_| !is_management_route(&location.pathname.get()));

    Effect::new(move |_| {
        let tab = active.get();
        path_values.set_path_val(vec![PathValue::new(":kind", tab.breadcrumb())]);
    });

    let on_select = move |tab: OpenContentTab| {
        if tab == active.get_untracked() {
            return;
        }
        tracing::debug!(tab = %tab, "switching open content tab");
        for path in tab.invalidates() {
            cache.invalidate(path);
        }
        navigate.with_value(|nav| nav(&tab.path(base), Default::default()));
    };

    view! {
        <div class="px-8 pb-4">
            <div class="flex flex-row items-center justify-between">
                <h1 class="text-2xl font-semibold">{title}</h1>
                <Show when=move || show_switch.get() fallback=|| ().into_view()>
                    <Button
                        variant=ButtonVariant::Outline
                        on:click=move |_| {
                            let path = active.get_untracked().path(switch_base);
                            navigate.with_value(|nav| nav(&path, Default::default()));
                        }
                    >
                        {switch_label}
                    </Button>
                </Show>
            </div>
            <TabView active=active on_select=on_select />
            <div class="flex flex-col gap-4 py-8">
                {move || match active.get() {
                    OpenContentTab::Libraries => {
                        view! { <LibraryLayout student_view=student_view.get() /> }.into_any()
                    }
                    OpenContentTab::Videos => {
                        view! { <VideoLayout student_view=student_view.get() /> }.into_any()
                    }
                    OpenContentTab::Favorites => view! { <FavoritesPage /> }.into_any(),
                }}
            </div>
        </div>
    }
}
