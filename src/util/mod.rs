use crate::models::UserRole;
use std::collections::HashSet;
use std::hash::Hash;

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep one item per key. When a key repeats, the last occurrence is kept
/// (at the position of that last occurrence).
pub(crate) fn dedup_last_wins<T, K: Eq + Hash>(items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen: HashSet<K> = HashSet::with_capacity(items.len());
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items.into_iter().rev() {
        if seen.insert(key(&item)) {
            out.push(item);
        }
    }
    out.reverse();
    out
}

/// Landing page for a role, used by consent decline/failure and "explore" links.
pub(crate) fn dashboard_for(role: Option<UserRole>) -> &'static str {
    match role {
        Some(r) if r.is_admin() => "/admin-dashboard",
        _ => "/home",
    }
}

pub(crate) fn open_content_base(role: Option<UserRole>) -> &'static str {
    match role {
        Some(r) if r.is_admin() => "/open-content-management",
        _ => "/open-content",
    }
}

/// Full page load (leaves the SPA), used for backend-supplied redirects.
pub(crate) fn hard_navigate(href: &str) {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.location().set_href(href) {
            tracing::warn!(href, error = ?e, "navigation failed");
        }
    }
}

pub(crate) fn open_in_new_tab(href: &str) {
    if let Some(w) = web_sys::window() {
        if let Err(e) = w.open_with_url_and_target(href, "_blank") {
            tracing::warn!(href, error = ?e, "window.open failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_last_occurrence_wins() {
        let items = vec![(1, "a"), (2, "b"), (1, "c"), (3, "d"), (2, "e")];
        let out = dedup_last_wins(items, |(id, _)| *id);
        assert_eq!(out, vec![(1, "c"), (3, "d"), (2, "e")]);
    }

    #[test]
    fn test_dedup_without_duplicates_keeps_order() {
        let items = vec![3, 1, 2];
        assert_eq!(dedup_last_wins(items, |x| *x), vec![3, 1, 2]);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("kiwix"), "Kiwix");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }

    #[test]
    fn test_dashboard_by_role() {
        assert_eq!(dashboard_for(Some(UserRole::Student)), "/home");
        assert_eq!(dashboard_for(Some(UserRole::Admin)), "/admin-dashboard");
        assert_eq!(dashboard_for(Some(UserRole::SystemAdmin)), "/admin-dashboard");
        assert_eq!(dashboard_for(None), "/home");
    }

    #[test]
    fn test_open_content_base_by_role() {
        assert_eq!(open_content_base(Some(UserRole::Student)), "/open-content");
        assert_eq!(
            open_content_base(Some(UserRole::Admin)),
            "/open-content-management"
        );
    }
}
