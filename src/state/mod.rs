pub(crate) mod consent;
pub(crate) mod favorite;
pub(crate) mod listing;
pub(crate) mod tabs;
pub(crate) mod toast;

use crate::api::{ApiClient, ApiError};
use crate::cache::CacheContext;
use crate::config::EnvConfig;
use crate::models::{User, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) use toast::{ToastContext, ToastState};

pub(crate) const DEFAULT_SORT_ORDER: &str = "created_at DESC";

/// Session-wide services. Created once when `App` mounts and provided as
/// context; nothing needs tearing down since they live as long as the page.
#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<User>>,
    pub user_loading: RwSignal<bool>,
    pub cache: CacheContext,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        let api_client = ApiClient::new(config.api_url.clone());
        Self {
            config,
            api_client: RwSignal::new(api_client),
            current_user: RwSignal::new(None),
            user_loading: RwSignal::new(true),
            cache: CacheContext::new(),
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.current_user.with(|u| u.as_ref().map(|u| u.role))
    }

    /// Resolve the viewer from the session cookie.
    pub fn load_user(&self) {
        let api_client = self.api_client.get_untracked();
        let current_user = self.current_user;
        let user_loading = self.user_loading;
        user_loading.set(true);
        spawn_local(async move {
            match api_client.current_user().await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, role = %user.role, "session resolved");
                    current_user.set(Some(user));
                }
                Err(ApiError::Unauthorized) => {
                    tracing::info!("no active session");
                    current_user.set(None);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to resolve session");
                    current_user.set(None);
                }
            }
            user_loading.set(false);
        });
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Helpful-links sort order shared by the pills and the resource lists.
#[derive(Clone, Copy)]
pub(crate) struct SortOrderContext {
    pub sort_order: RwSignal<String>,
}

impl SortOrderContext {
    pub fn new() -> Self {
        Self {
            sort_order: RwSignal::new(DEFAULT_SORT_ORDER.to_string()),
        }
    }

    /// Replace the default with the stored preference, if the backend has one.
    pub fn load(&self, api_client: ApiClient) {
        let sort_order = self.sort_order;
        spawn_local(async move {
            match api_client.helpful_links_sort().await {
                Ok(s) if !s.trim().is_empty() => sort_order.set(s),
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "keeping default sort order"),
            }
        });
    }
}

impl Default for SortOrderContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PathValue {
    pub path_id: String,
    pub value: String,
}

impl PathValue {
    pub fn new(path_id: &str, value: impl Into<String>) -> Self {
        Self {
            path_id: path_id.to_string(),
            value: value.into(),
        }
    }
}

/// Replace values with the same `path_id`; keep the others.
pub(crate) fn merge_path_values(current: &mut Vec<PathValue>, incoming: Vec<PathValue>) {
    for v in incoming {
        if let Some(existing) = current.iter_mut().find(|c| c.path_id == v.path_id) {
            existing.value = v.value;
        } else {
            current.push(v);
        }
    }
}

/// Dynamic breadcrumb segments such as `:kind` or `:library_name`.
#[derive(Clone, Copy)]
pub(crate) struct PathValueContext {
    pub values: RwSignal<Vec<PathValue>>,
}

impl PathValueContext {
    pub fn new() -> Self {
        Self {
            values: RwSignal::new(vec![]),
        }
    }

    pub fn set_path_val(&self, incoming: Vec<PathValue>) {
        self.values.update(|v| merge_path_values(v, incoming));
    }

    pub fn get(&self, path_id: &str) -> Option<String> {
        self.values
            .with(|v| v.iter().find(|p| p.path_id == path_id).map(|p| p.value.clone()))
    }

    /// Breadcrumb labels for a route pattern like `/viewer/libraries/:library_name`.
    pub fn resolve(&self, pattern: &str) -> Vec<String> {
        pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|seg| {
                if seg.starts_with(':') {
                    self.get(seg).unwrap_or_default()
                } else {
                    seg.replace('-', " ")
                }
            })
            .collect()
    }
}

impl Default for PathValueContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_path_values_replaces_by_id() {
        let mut v = vec![PathValue::new(":kind", "Libraries")];
        merge_path_values(
            &mut v,
            vec![
                PathValue::new(":kind", "Videos"),
                PathValue::new(":library_name", "Wikipedia"),
            ],
        );
        assert_eq!(
            v,
            vec![
                PathValue::new(":kind", "Videos"),
                PathValue::new(":library_name", "Wikipedia"),
            ]
        );
    }
}
