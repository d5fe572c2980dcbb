use crate::components::ui::{Button, ButtonVariant, Card, CardContent, CardDescription, CardTitle};
use crate::state::consent::{challenge_from_query, consent_target, ConsentDecision};
use crate::state::AppContext;
use crate::util::hard_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;

/// External provider login hand-off. Either button leaves the app.
#[component]
pub fn ConsentPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    let current_user = app_state.0.current_user;
    let search = use_location().search;
    let submitting = RwSignal::new(false);

    let role = move || current_user.with_untracked(|u| u.as_ref().map(|u| u.role));

    let on_accept = move |_: web_sys::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        let api_client = api.get_untracked();
        spawn_local(async move {
            let result = match challenge_from_query(&search.get_untracked()) {
                Some(challenge) => Some(api_client.accept_consent(&challenge).await),
                None => {
                    tracing::warn!("consent page opened without a challenge");
                    None
                }
            };
            if let Some(Err(e)) = &result {
                tracing::warn!(error = %e, "consent accept failed");
            }
            let target = consent_target(ConsentDecision::Accept, result, role());
            tracing::info!(target = %target, "leaving consent page");
            hard_navigate(&target);
        });
    };

    let on_decline = move |_: web_sys::MouseEvent| {
        let target = consent_target(ConsentDecision::Decline, None, role());
        tracing::info!(target = %target, "consent declined");
        hard_navigate(&target);
    };

    view! {
        <div class="mx-auto my-8 flex max-w-xl flex-col">
            <Card>
                <CardContent class="flex flex-col gap-6 p-8">
                    <CardTitle class="text-center text-3xl">"External Provider Login"</CardTitle>
                    <CardDescription class="text-center">
                        "Continue to login to the Education Provider?"
                    </CardDescription>
                    <div class="flex justify-evenly">
                        <Button variant=ButtonVariant::Danger class="w-24" on:click=on_decline>
                            "Decline"
                        </Button>
                        <Button class="w-24" attr:disabled=move || submitting.get() on:click=on_accept>
                            "Accept"
                        </Button>
                    </div>
                </CardContent>
            </Card>
        </div>
    }
}
