use crate::api::{FAVORITES_KEY, LIBRARIES_KEY};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Sub-view of the open content screens, mirrored in the second URL segment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub(crate) enum OpenContentTab {
    #[default]
    Libraries,
    Videos,
    Favorites,
}

impl OpenContentTab {
    /// `/open-content/videos` → `Videos`. Unknown or missing segments fall back
    /// to `Libraries`.
    pub fn from_path(pathname: &str) -> Self {
        pathname
            .split('/')
            .nth(2)
            .and_then(|seg| seg.parse().ok())
            .unwrap_or_default()
    }

    /// Label shown on the tab strip.
    pub fn label(self) -> &'static str {
        match self {
            Self::Libraries => "Kiwix",
            Self::Videos => "Videos",
            Self::Favorites => "Favorites",
        }
    }

    pub fn path(self, base: &str) -> String {
        format!("{base}/{}", self.as_ref().to_lowercase())
    }

    /// Cache paths to revalidate when switching to this tab, so favorite flags
    /// don't leak across tabs.
    pub fn invalidates(self) -> &'static [&'static str] {
        match self {
            Self::Libraries | Self::Videos => &[LIBRARIES_KEY, FAVORITES_KEY],
            Self::Favorites => &[],
        }
    }

    /// Value published to the `:kind` breadcrumb segment.
    pub fn breadcrumb(self) -> &'static str {
        match self {
            Self::Libraries => "Libraries",
            Self::Videos => "Videos",
            Self::Favorites => "Favorites",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_path() {
        assert_eq!(
            OpenContentTab::from_path("/open-content/videos"),
            OpenContentTab::Videos
        );
        assert_eq!(
            OpenContentTab::from_path("/open-content-management/Favorites"),
            OpenContentTab::Favorites
        );
        assert_eq!(
            OpenContentTab::from_path("/open-content"),
            OpenContentTab::Libraries
        );
        assert_eq!(
            OpenContentTab::from_path("/open-content/nonsense"),
            OpenContentTab::Libraries
        );
    }

    #[test]
    fn test_path_round_trips_through_from_path() {
        for tab in OpenContentTab::iter() {
            let path = tab.path("/open-content");
            assert_eq!(OpenContentTab::from_path(&path), tab);
        }
        assert_eq!(
            OpenContentTab::Videos.path("/open-content-management"),
            "/open-content-management/videos"
        );
    }

    #[test]
    fn test_switching_to_listing_tab_invalidates_libraries_and_favorites() {
        assert_eq!(
            OpenContentTab::Videos.invalidates(),
            &["/libraries", "/open-content/favorites"]
        );
        assert!(OpenContentTab::Favorites.invalidates().is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(OpenContentTab::Libraries.label(), "Kiwix");
        assert_eq!(OpenContentTab::Libraries.breadcrumb(), "Libraries");
        assert_eq!(OpenContentTab::Favorites.breadcrumb(), "Favorites");
    }
}
