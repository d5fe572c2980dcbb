use crate::api::{LIBRARIES_KEY, VIDEOS_KEY};
use crate::models::{UserRole, VisibilityFilter};

pub(crate) const DEFAULT_PER_PAGE: u32 = 20;

/// Filter/sort/page state of one listing screen.
///
/// Every filter setter resets `page` to 1 so a narrowed result set is never
/// shown at an out-of-range page. `revision` is not part of the request key;
/// it is handed to the fetch hook so a page-size change refetches even when
/// the key comes out the same.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ListingQuery {
    pub search: String,
    /// Selected category ids. Empty, or containing `0`, means "all".
    pub categories: Vec<u32>,
    pub visibility: VisibilityFilter,
    pub page: u32,
    pub per_page: u32,
    pub revision: u64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: vec![],
            visibility: VisibilityFilter::All,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            revision: 0,
        }
    }
}

impl ListingQuery {
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_categories(&mut self, categories: Vec<u32>) {
        self.categories = categories;
        self.page = 1;
    }

    pub fn set_visibility(&mut self, visibility: VisibilityFilter) {
        self.visibility = visibility;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Page-size changes go back to page 1 and force exactly one refetch.
    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.max(1);
        self.page = 1;
        self.revision += 1;
    }

    /// `""` when "all categories" is selected, otherwise the ids joined by commas.
    pub fn category_param(&self) -> String {
        if self.categories.is_empty() || self.categories.contains(&0) {
            return String::new();
        }
        self.categories
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn base_params(&self, visibility: VisibilityFilter) -> String {
        format!(
            "page={}&per_page={}&visibility={}&search={}",
            self.page,
            self.per_page,
            visibility.as_ref(),
            urlencoding::encode(&self.search),
        )
    }

    pub fn query_string(&self, visibility: VisibilityFilter) -> String {
        format!("{}&category={}", self.base_params(visibility), self.category_param())
    }

    /// Request signature for `kind`, used as the fetch-cache key.
    pub fn key(&self, kind: ListingKind, visibility: VisibilityFilter) -> String {
        if kind.filters_by_category() {
            format!("{}?{}", kind.path(), self.query_string(visibility))
        } else {
            format!("{}?{}", kind.path(), self.base_params(visibility))
        }
    }
}

/// Listing endpoint a [`ListingQuery`] is sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListingKind {
    Libraries,
    Videos,
}

impl ListingKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Libraries => LIBRARIES_KEY,
            Self::Videos => VIDEOS_KEY,
        }
    }

    /// Videos have no category filter.
    pub fn filters_by_category(self) -> bool {
        matches!(self, Self::Libraries)
    }
}

/// Only administrators on a management route choose the visibility filter;
/// everyone else, including an admin previewing the student view, sees
/// visible content only.
pub(crate) fn effective_visibility(
    role: UserRole,
    management_route: bool,
    selected: VisibilityFilter,
) -> VisibilityFilter {
    if role.is_admin() && management_route {
        selected
    } else {
        VisibilityFilter::Visible
    }
}

/// The role cards are rendered for. Admins outside management routes, or
/// with the student preview forced, get the student experience.
pub(crate) fn effective_role(role: UserRole, student_view: bool, management_route: bool) -> UserRole {
    if student_view || (role.is_admin() && !management_route) {
        UserRole::Student
    } else {
        role
    }
}

pub(crate) fn is_management_route(pathname: &str) -> bool {
    pathname.contains("management")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FetchTrigger;

    fn on_page_three() -> ListingQuery {
        let mut q = ListingQuery::default();
        q.set_page(3);
        q
    }

    #[test]
    fn test_query_string_format() {
        let mut q = ListingQuery::default();
        q.set_search("math");
        q.set_categories(vec![3]);
        q.set_page(2);
        assert_eq!(
            q.query_string(VisibilityFilter::Visible),
            "page=2&per_page=20&visibility=visible&search=math&category=3"
        );
    }

    #[test]
    fn test_multi_category_and_all() {
        let mut q = ListingQuery::default();
        q.set_categories(vec![3, 5, 8]);
        assert_eq!(q.category_param(), "3,5,8");
        q.set_categories(vec![0]);
        assert_eq!(q.category_param(), "");
        q.set_categories(vec![4, 0]);
        assert_eq!(q.category_param(), "");
        q.set_categories(vec![]);
        assert!(q.query_string(VisibilityFilter::All).ends_with("&category="));
    }

    #[test]
    fn test_search_is_encoded() {
        let mut q = ListingQuery::default();
        q.set_search("a&b c");
        assert!(q
            .query_string(VisibilityFilter::Visible)
            .contains("&search=a%26b%20c&"));
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut q = on_page_three();
        q.set_search("science");
        assert_eq!(q.page, 1);

        let mut q = on_page_three();
        q.set_categories(vec![2]);
        assert_eq!(q.page, 1);

        let mut q = on_page_three();
        q.set_visibility(VisibilityFilter::Hidden);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_per_page_change_resets_page_and_bumps_revision_once() {
        let mut q = on_page_three();
        let before = q.revision;
        q.set_per_page(50);
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 50);
        assert_eq!(q.revision, before + 1);
    }

    #[test]
    fn test_page_change_keeps_revision() {
        let mut q = ListingQuery::default();
        q.set_page(4);
        assert_eq!(q.revision, 0);
        q.set_page(0);
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_effective_visibility_by_role() {
        use VisibilityFilter::*;
        assert_eq!(effective_visibility(UserRole::Admin, true, Hidden), Hidden);
        assert_eq!(effective_visibility(UserRole::SystemAdmin, true, All), All);
        assert_eq!(effective_visibility(UserRole::Admin, false, Hidden), Visible);
        assert_eq!(effective_visibility(UserRole::Student, true, Hidden), Visible);
        assert_eq!(effective_visibility(UserRole::Student, false, All), Visible);
    }

    #[test]
    fn test_effective_role() {
        assert_eq!(effective_role(UserRole::Admin, false, true), UserRole::Admin);
        assert_eq!(effective_role(UserRole::Admin, true, true), UserRole::Student);
        assert_eq!(effective_role(UserRole::Admin, false, false), UserRole::Student);
        assert_eq!(effective_role(UserRole::Student, false, true), UserRole::Student);
    }

    #[test]
    fn test_management_route() {
        assert!(is_management_route("/open-content-management/libraries"));
        assert!(!is_management_route("/open-content/libraries"));
    }

    #[test]
    fn test_key_includes_path() {
        let q = ListingQuery::default();
        assert_eq!(
            q.key(ListingKind::Libraries, VisibilityFilter::All),
            "/libraries?page=1&per_page=20&visibility=all&search=&category="
        );
    }

    #[test]
    fn test_video_key_has_no_category() {
        let mut q = ListingQuery::default();
        q.set_categories(vec![3]);
        q.set_search("cells");
        assert_eq!(
            q.key(ListingKind::Videos, VisibilityFilter::Visible),
            "/videos?page=1&per_page=20&visibility=visible&search=cells"
        );
    }

    /// Fetches the listing hook would issue for `q`, given what it last sent.
    fn fetches(trigger: &mut FetchTrigger, q: &ListingQuery) -> usize {
        let key = q.key(ListingKind::Libraries, VisibilityFilter::Visible);
        usize::from(trigger.should_fetch(&key, q.revision))
    }

    #[test]
    fn test_per_page_change_issues_exactly_one_fetch() {
        let mut trigger = FetchTrigger::default();
        let mut q = on_page_three();
        assert_eq!(fetches(&mut trigger, &q), 1);

        q.set_per_page(50);
        assert_eq!(fetches(&mut trigger, &q) + fetches(&mut trigger, &q), 1);

        // Same size again: the key is unchanged but the revision still forces a refetch.
        q.set_per_page(50);
        assert_eq!(fetches(&mut trigger, &q) + fetches(&mut trigger, &q), 1);
    }

    #[test]
    fn test_reselecting_current_page_issues_no_fetch() {
        let mut trigger = FetchTrigger::default();
        let mut q = ListingQuery::default();
        assert_eq!(fetches(&mut trigger, &q), 1);
        q.set_page(1);
        assert_eq!(fetches(&mut trigger, &q), 0);
        q.set_page(2);
        assert_eq!(fetches(&mut trigger, &q), 1);
    }
}
