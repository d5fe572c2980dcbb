mod api;
mod app;
mod cache;
mod components;
mod config;
mod live;
mod logging;
mod models;
mod pages;
mod state;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(&EnvConfig::new().log_level);
    mount_to_body(App);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn set_env(pairs: &[(&str, &str)]) {
        let window = web_sys::window().expect("window");
        let env = js_sys::Object::new();
        for (k, v) in pairs {
            js_sys::Reflect::set(&env, &JsValue::from_str(k), &JsValue::from_str(v))
                .expect("set env key");
        }
        js_sys::Reflect::set(&window, &JsValue::from_str("ENV"), &env).expect("set window.ENV");
    }

    #[wasm_bindgen_test]
    fn test_config_reads_window_env() {
        set_env(&[("API_URL", "https://school.example/api"), ("LOG_LEVEL", "debug")]);
        let cfg = EnvConfig::new();
        assert_eq!(cfg.api_url, "https://school.example/api");
        assert_eq!(cfg.ws_url, "wss://school.example/api/ws/listen");
        assert_eq!(cfg.log_level, "debug");
    }

    #[wasm_bindgen_test]
    fn test_config_without_env_uses_page_origin() {
        let window = web_sys::window().expect("window");
        js_sys::Reflect::delete_property(window.unchecked_ref(), &JsValue::from_str("ENV"))
            .expect("clear window.ENV");
        let cfg = EnvConfig::new();
        assert!(cfg.api_url.ends_with("/api"));
        assert!(cfg.ws_url.ends_with("/api/ws/listen"));
    }

    #[wasm_bindgen_test]
    fn test_logging_init_is_idempotent() {
        logging::init("debug");
        logging::init("error");
        tracing::info!("logging initialised twice without panicking");
    }

    #[wasm_bindgen_test]
    fn test_now_ms_is_positive() {
        assert!(util::now_ms() > 0);
    }
}
