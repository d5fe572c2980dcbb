use crate::state::PathValueContext;
use icons::ChevronRight;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Route pattern whose `:name` segments are filled from [`PathValueContext`].
pub(crate) fn breadcrumb_pattern(pathname: &str) -> Option<&'static str> {
    let segs: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
    match segs.as_slice() {
        ["open-content", _] => Some("/open-content/:kind"),
        ["open-content-management", _] => Some("/open-content-management/:kind"),
        ["viewer", "libraries", _] => Some("/viewer/libraries/:library_name"),
        ["viewer", "videos", _] => Some("/viewer/videos/:video_name"),
        _ => None,
    }
}

#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let path_values = expect_context::<PathValueContext>();
    let location = use_location();

    let crumbs = move || {
        let pathname = location.pathname.get();
        match breadcrumb_pattern(&pathname) {
            Some(pattern) => path_values
                .resolve(pattern)
                .into_iter()
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>(),
            None => vec![],
        }
    };

    view! {
        <nav class="flex items-center gap-1 text-xs capitalize text-muted-foreground" aria-label="Breadcrumb">
            {move || {
                let crumbs = crumbs();
                let last = crumbs.len().saturating_sub(1);
                crumbs
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| view! {
                        <span class=if i == last { "text-foreground" } else { "" }>{c}</span>
                        {(i != last).then(|| view! { <ChevronRight class="size-3" /> })}
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_pattern() {
        assert_eq!(
            breadcrumb_pattern("/open-content/videos"),
            Some("/open-content/:kind")
        );
        assert_eq!(
            breadcrumb_pattern("/viewer/libraries/12"),
            Some("/viewer/libraries/:library_name")
        );
        assert_eq!(breadcrumb_pattern("/home"), None);
    }
}
