use crate::components::library_card::LibraryCard;
use crate::models::{Library, UserRole};
use crate::pages::listing_grid::{listing_grid, ListingItem};
use crate::state::listing::ListingKind;
use leptos::prelude::*;

impl ListingItem for Library {
    const KIND: ListingKind = ListingKind::Libraries;

    fn id(&self) -> u32 {
        self.id
    }

    fn row_key(&self) -> (u32, bool, bool) {
        (self.id, self.is_favorited.unwrap_or(false), self.visibility_status)
    }

    fn card(self, role: UserRole) -> AnyView {
        view! { <LibraryCard library=self role=role /> }.into_any()
    }
}

/// Paginated, filterable library grid.
#[component]
pub fn LibraryLayout(#[prop(optional)] student_view: bool) -> impl IntoView {
    listing_grid::<Library>(student_view, "Search libraries...", "lg:grid-cols-4")
}

#[cfg(test)]
mod tests {
    use crate::pages::listing_grid::decode_listing;
    use crate::models::Library;
    use serde_json::json;

    fn library(id: u32, name: &str, favorited: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "open_content_provider_id": 1,
            "visibility_status": true,
            "is_favorited": favorited,
        })
    }

    #[test]
    fn test_duplicate_library_ids_render_once_last_wins() {
        let body = json!({
            "data": [library(7, "Old", false), library(8, "Other", false), library(7, "New", true)],
            "meta": {"total": 3, "per_page": 20, "page": 1, "current_page": 1, "last_page": 1}
        });
        let resp = decode_listing::<Library>(body).expect("decodes");
        let rows: Vec<(u32, &str, Option<bool>)> = resp
            .data
            .iter()
            .map(|l| (l.id, l.name.as_str(), l.is_favorited))
            .collect();
        assert_eq!(rows, vec![(8, "Other", Some(false)), (7, "New", Some(true))]);
    }
}
