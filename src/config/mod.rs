use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "/api";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_RECONNECT_INITIAL_MS: u64 = 1_000;
const DEFAULT_RECONNECT_MAX_MS: u64 = 30_000;
const DEFAULT_STALE_AFTER_MS: u64 = 10_000;

/// Session configuration, injected by the hosting page as `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub ws_url: String,
    pub log_level: String,
    pub reconnect_initial_ms: u64,
    pub reconnect_max_ms: u64,
    pub stale_after_ms: u64,
}

impl EnvConfig {
    pub fn new() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        let lookup = |key: &str| -> Option<String> {
            let env = env.as_ref()?;
            let v = js_sys::Reflect::get(env, &key.into()).ok()?;
            v.as_string().or_else(|| v.as_f64().map(|n| n.to_string()))
        };

        Self::from_lookup(lookup, origin.as_deref())
    }

    /// Resolve every setting through `lookup`. For each setting the
    /// upper-case key (README style) wins over the lower-case one.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>, origin: Option<&str>) -> Self {
        let get = |upper: &str| {
            lookup(upper)
                .or_else(|| lookup(&upper.to_lowercase()))
                .filter(|s| !s.trim().is_empty())
        };
        let get_ms = |upper: &str, default: u64| {
            get(upper)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n as u64)
                .unwrap_or(default)
        };

        let api_url = get("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = absolutize(&api_url, origin);

        let ws_url = get("WS_URL").unwrap_or_else(|| derive_ws_url(&api_url));

        Self {
            api_url,
            ws_url,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            reconnect_initial_ms: get_ms("RECONNECT_INITIAL_MS", DEFAULT_RECONNECT_INITIAL_MS),
            reconnect_max_ms: get_ms("RECONNECT_MAX_MS", DEFAULT_RECONNECT_MAX_MS),
            stale_after_ms: get_ms("STALE_AFTER_MS", DEFAULT_STALE_AFTER_MS),
        }
    }

    pub fn reconnect_policy(&self) -> crate::live::ReconnectPolicy {
        crate::live::ReconnectPolicy {
            initial_delay: Duration::from_millis(self.reconnect_initial_ms),
            max_delay: Duration::from_millis(self.reconnect_max_ms.max(self.reconnect_initial_ms)),
            stale_after: Duration::from_millis(self.stale_after_ms),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP requests need an absolute URL; a relative prefix is resolved against the page origin.
pub(crate) fn absolutize(api_url: &str, origin: Option<&str>) -> String {
    let api_url = api_url.trim_end_matches('/');
    if api_url.starts_with("http://") || api_url.starts_with("https://") {
        return api_url.to_string();
    }
    let origin = origin.unwrap_or("http://localhost").trim_end_matches('/');
    format!("{origin}/{}", api_url.trim_start_matches('/'))
}

/// `http(s)://host/api` -> `ws(s)://host/api/ws/listen`.
pub(crate) fn derive_ws_url(api_url: &str) -> String {
    let ws = if let Some(rest) = api_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = api_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        api_url.to_string()
    };

    format!("{}/ws/listen", ws.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let cfg = EnvConfig::from_lookup(|_| None, Some("https://edu.example.org"));
        assert_eq!(cfg.api_url, "https://edu.example.org/api");
        assert_eq!(cfg.ws_url, "wss://edu.example.org/api/ws/listen");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.reconnect_initial_ms, 1_000);
        assert_eq!(cfg.reconnect_max_ms, 30_000);
        assert_eq!(cfg.stale_after_ms, 10_000);
    }

    #[test]
    fn test_upper_case_key_wins() {
        let cfg = EnvConfig::from_lookup(
            lookup_from(&[("API_URL", "http://a:8080/api/"), ("api_url", "http://b/api")]),
            None,
        );
        assert_eq!(cfg.api_url, "http://a:8080/api");
        assert_eq!(cfg.ws_url, "ws://a:8080/api/ws/listen");
    }

    #[test]
    fn test_lower_case_fallback_and_numbers() {
        let cfg = EnvConfig::from_lookup(
            lookup_from(&[
                ("api_url", "https://b/api"),
                ("ws_url", "wss://live.example/ws"),
                ("RECONNECT_INITIAL_MS", "250"),
                ("stale_after_ms", "not-a-number"),
            ]),
            None,
        );
        assert_eq!(cfg.api_url, "https://b/api");
        assert_eq!(cfg.ws_url, "wss://live.example/ws");
        assert_eq!(cfg.reconnect_initial_ms, 250);
        assert_eq!(cfg.stale_after_ms, 10_000);
    }

    #[test]
    fn test_reconnect_policy_max_never_below_initial() {
        let cfg = EnvConfig::from_lookup(
            lookup_from(&[("RECONNECT_INITIAL_MS", "5000"), ("RECONNECT_MAX_MS", "100")]),
            None,
        );
        let policy = cfg.reconnect_policy();
        assert_eq!(policy.initial_delay, Duration::from_millis(5000));
        assert_eq!(policy.max_delay, Duration::from_millis(5000));
    }

    #[test]
    fn test_relative_api_url_without_origin() {
        let cfg = EnvConfig::from_lookup(lookup_from(&[("API_URL", "api/")]), None);
        assert_eq!(cfg.api_url, "http://localhost/api");
        assert_eq!(cfg.ws_url, "ws://localhost/api/ws/listen");
    }
}
