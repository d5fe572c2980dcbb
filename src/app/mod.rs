use crate::components::toaster::Toaster;
use crate::config::EnvConfig;
use crate::pages::{
    ConsentPage, DashboardPage, LibraryViewer, OpenContentManagementPage, OpenContentPage,
    RootAuthed, VideoViewer,
};
use crate::state::{AppContext, AppState, PathValueContext, SortOrderContext, ToastContext};
use crate::util::dashboard_for;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{path, NavigateOptions};

/// `/` lands on the viewer's dashboard.
#[component]
fn RoleHome() -> impl IntoView {
    let current_user = expect_context::<AppContext>().0.current_user;
    let navigate = use_navigate();

    Effect::new(move |_| {
        let role = current_user.with(|u| u.as_ref().map(|u| u.role));
        navigate(
            dashboard_for(role),
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });
}

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new(EnvConfig::new());
    tracing::info!(api_url = %app_state.config.api_url, ws_url = %app_state.config.ws_url, "starting");
    app_state.load_user();

    let sort = SortOrderContext::new();
    sort.load(app_state.api_client.get_untracked());

    provide_context(AppContext(app_state));
    provide_context(ToastContext::new());
    provide_context(sort);
    provide_context(PathValueContext::new());

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("home") view=move || view! {
                    <RootAuthed>
                        <DashboardPage />
                    </RootAuthed>
                } />
                <Route path=path!("admin-dashboard") view=move || view! {
                    <RootAuthed>
                        <DashboardPage />
                    </RootAuthed>
                } />
                <Route path=path!("open-content/:tab") view=move || view! {
                    <RootAuthed>
                        <OpenContentPage />
                    </RootAuthed>
                } />
                <Route path=path!("open-content-management/:tab") view=move || view! {
                    <RootAuthed>
                        <OpenContentManagementPage />
                    </RootAuthed>
                } />
                <Route path=path!("viewer/libraries/:id") view=move || view! {
                    <RootAuthed>
                        <LibraryViewer />
                    </RootAuthed>
                } />
                <Route path=path!("viewer/videos/:id") view=move || view! {
                    <RootAuthed>
                        <VideoViewer />
                    </RootAuthed>
                } />
                <Route path=path!("consent") view=ConsentPage />
                <Route path=path!("") view=move || view! {
                    <RootAuthed>
                        <RoleHome />
                    </RootAuthed>
                } />
            </Routes>
        </Router>
        <Toaster />
    }
}
