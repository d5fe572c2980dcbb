use crate::components::video_card::VideoCard;
use crate::models::{UserRole, Video};
use crate::pages::listing_grid::{listing_grid, ListingItem};
use crate::state::listing::ListingKind;
use leptos::prelude::*;

impl ListingItem for Video {
    const KIND: ListingKind = ListingKind::Videos;

    fn id(&self) -> u32 {
        self.id
    }

    fn row_key(&self) -> (u32, bool, bool) {
        (self.id, self.is_favorited, self.visibility_status)
    }

    fn card(self, role: UserRole) -> AnyView {
        view! { <VideoCard video=self role=role /> }.into_any()
    }
}

/// Paginated, filterable video grid.
#[component]
pub fn VideoLayout(#[prop(optional)] student_view: bool) -> impl IntoView {
    listing_grid::<Video>(student_view, "Search videos...", "lg:grid-cols-3")
}

#[cfg(test)]
mod tests {
    use crate::models::Video;
    use crate::pages::listing_grid::decode_listing;
    use serde_json::json;

    #[test]
    fn test_duplicate_video_ids_render_once_last_wins() {
        let video = |id: u32, title: &str| {
            json!({"id": id, "title": title, "open_content_provider_id": 2, "visibility_status": true})
        };
        let body = json!({"data": [video(4, "Cells"), video(4, "Cells (updated)"), video(5, "Atoms")]});
        let resp = decode_listing::<Video>(body).expect("decodes");
        let titles: Vec<&str> = resp.data.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Cells (updated)", "Atoms"]);
    }
}
