use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col overflow-hidden rounded-lg border shadow-sm"}
    clx! {CardHeader, div, "flex items-center gap-2 border-b p-4"}
    clx! {CardTitle, h3, "flex-1 text-sm font-semibold leading-5"}
    clx! {CardContent, div, "flex flex-col gap-2 p-4"}
    clx! {CardDescription, p, "text-muted-foreground text-xs leading-5 line-clamp-2"}
    clx! {CardRow, div, "bg-card flex flex-row items-center gap-3 rounded-lg border px-4 py-2 shadow-sm"}
}

pub use components::*;
