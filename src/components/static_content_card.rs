use crate::components::ui::{Card, CardContent, CardDescription, CardTitle};
use crate::models::OpenContentProvider;
use leptos::prelude::*;

/// Provider entry point in the resources sidebar.
#[component]
pub fn StaticContentCard(provider: OpenContentProvider) -> impl IntoView {
    let href = provider.entry_path();

    view! {
        <Card>
            <CardContent>
                <div class="flex items-center gap-3">
                    <img
                        class="size-10 rounded object-contain"
                        src=provider.thumbnail_url.unwrap_or_default()
                        alt=provider.name.clone()
                    />
                    <CardTitle>{provider.name.clone()}</CardTitle>
                </div>
                <CardDescription>{provider.description.unwrap_or_default()}</CardDescription>
                <a class="text-sm font-medium text-primary underline-offset-4 hover:underline" href=href>
                    "Explore Content"
                </a>
            </CardContent>
        </Card>
    }
}
