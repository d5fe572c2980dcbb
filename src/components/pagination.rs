use crate::components::ui::{Button, ButtonSize, ButtonVariant, NativeSelect, SelectChoice};
use crate::models::PaginationMeta;
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;

pub(crate) const PER_PAGE_CHOICES: [u32; 4] = [10, 20, 50, 100];

/// Up to `span` page numbers centered on `current`, clamped to `1..=last`.
pub(crate) fn page_window(current: u32, last: u32, span: u32) -> Vec<u32> {
    let last = last.max(1);
    let current = current.clamp(1, last);
    let span = span.clamp(1, last);
    let start = current
        .saturating_sub(span / 2)
        .max(1)
        .min(last + 1 - span);
    (start..start + span).collect()
}

/// Page controls driven entirely by backend metadata.
#[component]
pub fn Pagination(
    #[prop(into)] meta: Signal<PaginationMeta>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into)] on_per_page: Callback<u32>,
) -> impl IntoView {
    let current = move || meta.with(|m| m.current_page.max(1));
    let last = move || meta.with(|m| m.last_page.max(1));

    let per_page_choices = Signal::derive(|| {
        PER_PAGE_CHOICES
            .iter()
            .map(|n| SelectChoice::new(n.to_string(), n.to_string()))
            .collect::<Vec<_>>()
    });

    view! {
        <nav class="flex items-center gap-2" aria-label="Pagination">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || current() <= 1
                on:click=move |_| on_page.run(current().saturating_sub(1).max(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                let cur = current();
                page_window(cur, last(), 5)
                    .into_iter()
                    .map(|p| {
                        let variant = if p == cur { ButtonVariant::Default } else { ButtonVariant::Ghost };
                        view! {
                            <Button
                                variant=variant
                                size=ButtonSize::Icon
                                attr:aria-current=(p == cur).then_some("page")
                                on:click=move |_| on_page.run(p)
                            >
                                {p}
                            </Button>
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || current() >= last()
                on:click=move |_| on_page.run((current() + 1).min(last()))
            >
                <ChevronRight />
            </Button>

            <span class="text-xs text-muted-foreground">
                {move || format!("{} total", meta.with(|m| m.total))}
            </span>

            <NativeSelect
                class="h-8 text-xs"
                aria_label="Items per page"
                choices=per_page_choices
                value=Signal::derive(move || meta.with(|m| m.per_page.to_string()))
                on_change=move |v: String| {
                    if let Ok(n) = v.parse::<u32>() {
                        on_per_page.run(n);
                    }
                }
            />
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_centers_on_current() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_page_window_clamps_at_edges() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
    }

    #[test]
    fn test_page_window_with_empty_meta() {
        assert_eq!(page_window(0, 0, 5), vec![1]);
        assert_eq!(page_window(7, 1, 5), vec![1]);
    }
}
