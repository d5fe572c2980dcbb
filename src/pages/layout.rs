use crate::components::breadcrumbs::Breadcrumbs;
use crate::components::ui::Loading;
use crate::state::AppContext;
use crate::util::{dashboard_for, open_content_base};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

const LOGIN_PATH: &str = "/login";

#[component]
pub fn AppLayout(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let current_user = app_state.0.current_user;
    let location = use_location();

    let role = move || current_user.with(|u| u.as_ref().map(|u| u.role));
    let nav_class = move |prefix: &'static str| {
        if location.pathname.get().starts_with(prefix) {
            "text-sm font-medium text-foreground"
        } else {
            "text-sm text-muted-foreground hover:text-foreground"
        }
    };

    view! {
        <div class="flex min-h-screen flex-col bg-background">
            <header class="flex items-center gap-6 border-b px-8 py-3">
                <a href=move || dashboard_for(role()) class="text-sm font-semibold">"Learning Portal"</a>
                <a href=move || dashboard_for(role()) class=move || nav_class(dashboard_for(role()))>"Home"</a>
                <a
                    href=move || format!("{}/libraries", open_content_base(role()))
                    class=move || nav_class(open_content_base(role()))
                >
                    "Open Content"
                </a>
                <div class="flex-1" />
                <span class="text-xs text-muted-foreground">
                    {move || current_user.with(|u| u.as_ref().map(|u| u.name_first.clone()).unwrap_or_default())}
                </span>
            </header>
            <div class="px-8 py-2">
                <Breadcrumbs />
            </div>
            <main class="min-w-0 flex-1">{children()}</main>
        </div>
    }
}

/// Waits for the session check, then renders `children` inside the app chrome.
/// Without a session the browser is sent to the external login.
#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let user_loading = app_state.0.user_loading;
    let current_user = app_state.0.current_user;

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    Effect::new(move |_| {
        if !user_loading.get() && current_user.with(|u| u.is_none()) {
            tracing::info!("no session, redirecting to login");
            crate::util::hard_navigate(LOGIN_PATH);
        }
    });

    view! {
        <Show when=move || !user_loading.get() && current_user.with(|u| u.is_some()) fallback=|| view! { <Loading /> }>
            <AppLayout>
                {move || children.with_value(|c| c())}
            </AppLayout>
        </Show>
    }
}
