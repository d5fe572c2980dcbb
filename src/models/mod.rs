use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub(crate) enum UserRole {
    #[default]
    Student,
    Admin,
    SystemAdmin,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SystemAdmin)
    }
}

/// Authenticated viewer as returned by `/auth/check`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct User {
    pub id: u32,
    #[serde(default)]
    pub name_first: String,
    #[serde(default)]
    pub name_last: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Library {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub visibility_status: bool,
    /// Only present when the backend resolved favorites for the current viewer.
    #[serde(default)]
    pub is_favorited: Option<bool>,
    pub open_content_provider_id: u32,
    #[serde(default)]
    pub open_content_provider_name: String,
}

impl Library {
    /// Provider name with its first letter upper-cased, as shown on cards.
    pub fn provider_display_name(&self) -> String {
        crate::util::capitalize_first(&self.open_content_provider_name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Video {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub visibility_status: bool,
    #[serde(default)]
    pub is_favorited: bool,
    pub open_content_provider_id: u32,
    /// Playable source, when the backend has one cached.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ContentType {
    Video,
    Library,
}

impl ContentType {
    pub fn viewer_path(self, content_id: u32) -> String {
        match self {
            ContentType::Video => format!("/viewer/videos/{content_id}"),
            ContentType::Library => format!("/viewer/libraries/{content_id}"),
        }
    }
}

/// Entry of the dashboard "top content" lists.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct OpenContentItem {
    pub content_id: u32,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub content_type: ContentType,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

/// One row of `/open-content/favorites`; libraries and videos share this shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CombinedFavorite {
    pub id: u32,
    pub content_id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub open_content_provider_id: u32,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub provider_name: String,
}

impl CombinedFavorite {
    pub fn subtitle(&self) -> &str {
        match self.content_type {
            ContentType::Video => &self.channel_title,
            ContentType::Library => &self.provider_name,
        }
    }

    /// Where a click on the card goes; disabled favorites have no destination.
    pub fn navigation_target(&self) -> Option<String> {
        if self.is_disabled {
            None
        } else {
            Some(self.content_type.viewer_path(self.content_id))
        }
    }

    pub fn as_content_item(&self) -> OpenContentItem {
        OpenContentItem {
            content_id: self.content_id,
            name: self.name.clone(),
            thumbnail_url: Some(self.thumbnail_url.clone()),
            content_type: self.content_type,
            url: String::new(),
            channel_title: Some(self.channel_title.clone()),
            provider_name: Some(self.provider_name.clone()),
            is_disabled: self.is_disabled,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct HelpfulLink {
    pub id: u32,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub visibility_status: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct OpenContentProvider {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub currently_enabled: bool,
}

impl OpenContentProvider {
    /// Student-facing entry point for this provider's content.
    pub fn entry_path(&self) -> &'static str {
        match self.name.to_lowercase().as_str() {
            "youtube" => "/open-content/videos",
            _ => "/open-content/libraries",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct OpenContentCategory {
    pub id: u32,
    pub name: String,
}

/// Always taken from the backend; the client never computes page counts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PaginationMeta {
    pub total: u64,
    pub per_page: u32,
    pub page: u32,
    pub current_page: u32,
    pub last_page: u32,
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self {
            total: 0,
            per_page: 20,
            page: 1,
            current_page: 1,
            last_page: 1,
        }
    }
}

/// Admin visibility dropdown. Students are always pinned to `Visible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, AsRefStr, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum VisibilityFilter {
    #[default]
    All,
    Visible,
    Hidden,
}

impl VisibilityFilter {
    pub fn label(self) -> &'static str {
        match self {
            VisibilityFilter::All => "All Libraries",
            VisibilityFilter::Visible => "Visible",
            VisibilityFilter::Hidden => "Hidden",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_contract_deserialize_without_favorite_flag() {
        let json = r#"{
            "id": 7,
            "name": "wikipedia_en_all",
            "description": null,
            "image_url": "https://example.org/wiki.png",
            "visibility_status": true,
            "open_content_provider_id": 1,
            "open_content_provider_name": "kiwix",
            "url": "/content/wikipedia_en_all"
        }"#;
        let lib: Library = serde_json::from_str(json).expect("library should parse");
        assert_eq!(lib.id, 7);
        assert!(lib.is_favorited.is_none());
        assert_eq!(lib.provider_display_name(), "Kiwix");
    }

    #[test]
    fn combined_favorite_type_discriminator() {
        let json = r#"[
            {"id": 1, "content_id": 10, "name": "Khan", "type": "video", "thumbnail_url": "t",
             "description": "", "is_disabled": false, "open_content_provider_id": 2,
             "channel_title": "Khan Academy"},
            {"id": 2, "content_id": 11, "name": "Wiki", "type": "library", "thumbnail_url": "t",
             "description": "", "is_disabled": true, "open_content_provider_id": 1,
             "provider_name": "Kiwix"}
        ]"#;
        let favs: Vec<CombinedFavorite> = serde_json::from_str(json).expect("favorites parse");
        assert_eq!(favs[0].content_type, ContentType::Video);
        assert_eq!(favs[0].subtitle(), "Khan Academy");
        assert_eq!(favs[1].content_type, ContentType::Library);
        assert_eq!(favs[1].subtitle(), "Kiwix");
    }

    #[test]
    fn disabled_favorite_has_no_navigation_target() {
        let mut fav = CombinedFavorite {
            id: 1,
            content_id: 42,
            name: "Retired".to_string(),
            content_type: ContentType::Library,
            thumbnail_url: String::new(),
            description: String::new(),
            is_disabled: true,
            open_content_provider_id: 1,
            channel_title: String::new(),
            provider_name: String::new(),
        };
        assert_eq!(fav.navigation_target(), None);

        fav.is_disabled = false;
        assert_eq!(
            fav.navigation_target().as_deref(),
            Some("/viewer/libraries/42")
        );
    }

    #[test]
    fn provider_entry_path_by_name() {
        let mut p = OpenContentProvider {
            id: 1,
            name: "Kiwix".to_string(),
            description: None,
            thumbnail_url: None,
            currently_enabled: true,
        };
        assert_eq!(p.entry_path(), "/open-content/libraries");
        p.name = "YouTube".to_string();
        assert_eq!(p.entry_path(), "/open-content/videos");
        p.name = "Kolibri".to_string();
        assert_eq!(p.entry_path(), "/open-content/libraries");
    }

    #[test]
    fn user_role_admin_check() {
        assert!(!UserRole::Student.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::SystemAdmin.is_admin());

        let u: User = serde_json::from_str(r#"{"id": 3, "name_first": "Ada", "role": "system_admin"}"#)
            .expect("user parse");
        assert_eq!(u.role, UserRole::SystemAdmin);
    }

    #[test]
    fn visibility_filter_wire_values() {
        assert_eq!(VisibilityFilter::All.as_ref(), "all");
        assert_eq!(VisibilityFilter::Visible.as_ref(), "visible");
        assert_eq!(VisibilityFilter::Hidden.to_string(), "hidden");
    }
}
