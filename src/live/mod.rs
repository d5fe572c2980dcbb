//! Real-time favorite status for an open viewer.
//!
//! The backend pushes the literal text `true` or `false` over `/ws/listen`
//! whenever the viewed item's favorite state changes. The client never sends.
//! A dropped connection is re-established with exponential backoff; if it
//! stays down longer than `stale_after` the viewer is flagged stale, and a
//! successful reconnect triggers a metadata refetch to catch up on anything
//! missed.

use crate::util::now_ms;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use strum::AsRefStr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

/// `"true"` / `"false"` only. Anything else (including whitespace variants)
/// is ignored.
pub(crate) fn parse_favorite_message(payload: &str) -> Option<bool> {
    match payload {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// How long the channel may be down before the viewer is marked stale.
    pub stale_after: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            stale_after: Duration::from_secs(10),
        }
    }
}

/// `delay = min(initial * 2^attempt, max) * (1 + 0.25 * sin(attempt * 7.3))`
///
/// The jitter is deterministic in `attempt`, never exceeding 1.25x the cap.
pub(crate) fn calculate_backoff(attempt: u32, policy: &ReconnectPolicy) -> Duration {
    let base = policy.initial_delay.as_secs_f64() * 2.0_f64.powi(attempt.min(30) as i32);
    let capped = base.min(policy.max_delay.as_secs_f64());

    let jitter_factor = 1.0 + 0.25 * (attempt as f64 * 7.3).sin();
    Duration::from_secs_f64((capped * jitter_factor).max(0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum ChannelStatus {
    Connecting,
    Open,
    Reconnecting,
    Closed,
}

/// Connection bookkeeping with no I/O, driven by socket events. Times are
/// epoch milliseconds supplied by the caller.
#[derive(Debug, Clone)]
pub(crate) struct Supervisor {
    policy: ReconnectPolicy,
    attempt: u32,
    status: ChannelStatus,
    ever_opened: bool,
    shutting_down: bool,
    /// Start of the current outage; `None` while connected.
    down_since_ms: Option<i64>,
}

impl Supervisor {
    pub fn new(policy: ReconnectPolicy, now_ms: i64) -> Self {
        Self {
            policy,
            attempt: 0,
            status: ChannelStatus::Connecting,
            ever_opened: false,
            shutting_down: false,
            down_since_ms: Some(now_ms),
        }
    }

    pub fn status(&self) -> ChannelStatus {
        self.status
    }

    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Returns `true` when this open follows an earlier connection, meaning
    /// state pushed during the outage may have been missed.
    pub fn on_open(&mut self) -> bool {
        let resync = self.ever_opened;
        self.ever_opened = true;
        self.attempt = 0;
        self.status = ChannelStatus::Open;
        self.down_since_ms = None;
        resync
    }

    /// Delay before the next attempt, or `None` if the close was requested.
    pub fn on_close(&mut self, now_ms: i64) -> Option<Duration> {
        if self.shutting_down {
            self.status = ChannelStatus::Closed;
            return None;
        }
        let delay = calculate_backoff(self.attempt, &self.policy);
        self.attempt = self.attempt.saturating_add(1);
        self.status = ChannelStatus::Reconnecting;
        self.down_since_ms.get_or_insert(now_ms);
        Some(delay)
    }

    pub fn on_reconnect_attempt(&mut self) {
        if !self.shutting_down {
            self.status = ChannelStatus::Connecting;
        }
    }

    pub fn shutdown(&mut self) {
        self.shutting_down = true;
        self.status = ChannelStatus::Closed;
    }

    pub fn is_stale(&self, now_ms: i64) -> bool {
        match self.down_since_ms {
            Some(since) if !self.shutting_down => {
                now_ms.saturating_sub(since) >= self.policy.stale_after.as_millis() as i64
            }
            _ => false,
        }
    }
}

struct SocketHandlers {
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

struct ChannelInner {
    url: String,
    supervisor: Supervisor,
    socket: Option<WebSocket>,
    handlers: Option<SocketHandlers>,
    reconnect_timer: Option<i32>,
    stale_timer: Option<i32>,
}

/// One supervised socket per mounted viewer.
///
/// Not `Send`; keep it in `StoredValue::new_local` and call [`close`] from
/// `on_cleanup`. Socket handlers hold clones of the channel, so the cycle is
/// only broken by `close`.
///
/// [`close`]: FavoriteChannel::close
#[derive(Clone)]
pub(crate) struct FavoriteChannel {
    inner: Rc<RefCell<ChannelInner>>,
    on_favorite: Rc<dyn Fn(bool)>,
    on_resync: Rc<dyn Fn()>,
    pub status: RwSignal<ChannelStatus>,
    pub stale: RwSignal<bool>,
}

impl FavoriteChannel {
    pub fn connect(
        url: impl Into<String>,
        policy: ReconnectPolicy,
        on_favorite: impl Fn(bool) + 'static,
        on_resync: impl Fn() + 'static,
    ) -> Self {
        let channel = Self {
            inner: Rc::new(RefCell::new(ChannelInner {
                url: url.into(),
                supervisor: Supervisor::new(policy, now_ms()),
                socket: None,
                handlers: None,
                reconnect_timer: None,
                stale_timer: None,
            })),
            on_favorite: Rc::new(on_favorite),
            on_resync: Rc::new(on_resync),
            status: RwSignal::new(ChannelStatus::Connecting),
            stale: RwSignal::new(false),
        };
        channel.arm_stale_timer();
        channel.open_socket();
        channel
    }

    fn open_socket(&self) {
        let url = {
            let mut inner = self.inner.borrow_mut();
            if inner.supervisor.is_shutting_down() {
                return;
            }
            inner.reconnect_timer = None;
            inner.supervisor.on_reconnect_attempt();
            inner.url.clone()
        };
        self.publish_status();

        let socket = match WebSocket::new(&url) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(url = %url, error = ?e, "favorite channel: socket construction failed");
                self.handle_close();
                return;
            }
        };

        let this = self.clone();
        let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| this.handle_open());

        let this = self.clone();
        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
            let Some(text) = ev.data().as_string() else {
                tracing::debug!("favorite channel: ignoring non-text frame");
                return;
            };
            match parse_favorite_message(&text) {
                Some(v) => {
                    tracing::debug!(favorited = v, "favorite channel: update");
                    (this.on_favorite)(v);
                }
                None => tracing::debug!(payload = %text, "favorite channel: ignoring payload"),
            }
        });

        let this = self.clone();
        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
            tracing::info!(code = ev.code(), clean = ev.was_clean(), "favorite channel closed");
            this.handle_close();
        });

        // An error is always followed by close; reconnecting happens there.
        let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            tracing::debug!("favorite channel: socket error");
        });

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let mut inner = self.inner.borrow_mut();
        inner.socket = Some(socket);
        inner.handlers = Some(SocketHandlers {
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        });
    }

    fn handle_open(&self) {
        let resync = {
            let mut inner = self.inner.borrow_mut();
            let resync = inner.supervisor.on_open();
            if let Some(tid) = inner.stale_timer.take() {
                clear_timeout(tid);
            }
            resync
        };
        tracing::info!(resync, "favorite channel open");
        self.publish_status();
        self.stale.set(false);
        if resync {
            (self.on_resync)();
        }
    }

    fn handle_close(&self) {
        let (delay, attempt) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(socket) = inner.socket.take() {
                detach(&socket);
            }
            // The closing handler is still on the stack; it is freed once the
            // next socket's handlers replace it or the channel is closed.
            let delay = inner.supervisor.on_close(now_ms());
            (delay, inner.supervisor.attempt())
        };

        let Some(delay) = delay else {
            self.publish_status();
            return;
        };

        tracing::info!(delay_ms = delay.as_millis() as u64, attempt, "favorite channel: reconnecting");
        self.publish_status();
        self.arm_stale_timer();

        let this = self.clone();
        let tid = set_timeout(delay, move || this.open_socket());
        self.inner.borrow_mut().reconnect_timer = tid;
    }

    fn publish_status(&self) {
        let status = self.inner.borrow().supervisor.status();
        self.status.set(status);
    }

    fn arm_stale_timer(&self) {
        let stale_after = {
            let inner = self.inner.borrow();
            if inner.stale_timer.is_some() {
                return;
            }
            inner.supervisor.policy().stale_after
        };

        let this = self.clone();
        let tid = set_timeout(stale_after, move || {
            let stale = {
                let mut inner = this.inner.borrow_mut();
                inner.stale_timer = None;
                inner.supervisor.is_stale(now_ms())
            };
            if stale {
                tracing::warn!("favorite channel stale");
                this.stale.set(true);
            }
        });
        self.inner.borrow_mut().stale_timer = tid;
    }

    /// Stop reconnecting and close the socket if it is open or opening.
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.supervisor.shutdown();
        if let Some(tid) = inner.reconnect_timer.take() {
            clear_timeout(tid);
        }
        if let Some(tid) = inner.stale_timer.take() {
            clear_timeout(tid);
        }
        if let Some(socket) = inner.socket.take() {
            detach(&socket);
            let state = socket.ready_state();
            if state == WebSocket::OPEN || state == WebSocket::CONNECTING {
                if let Err(e) = socket.close() {
                    tracing::debug!(error = ?e, "favorite channel: close failed");
                }
            }
        }
        inner.handlers = None;
        tracing::debug!("favorite channel shut down");
    }
}

fn detach(socket: &WebSocket) {
    socket.set_onopen(None);
    socket.set_onmessage(None);
    socket.set_onclose(None);
    socket.set_onerror(None);
}

fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        delay.as_millis().min(i32::MAX as u128) as i32,
    )
    .ok()
}

fn clear_timeout(tid: i32) {
    if let Some(win) = web_sys::window() {
        win.clear_timeout_with_handle(tid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReconnectPolicy {
        ReconnectPolicy {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            stale_after: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_parse_favorite_message() {
        assert_eq!(parse_favorite_message("true"), Some(true));
        assert_eq!(parse_favorite_message("false"), Some(false));
        assert_eq!(parse_favorite_message("TRUE"), None);
        assert_eq!(parse_favorite_message(" true"), None);
        assert_eq!(parse_favorite_message("{\"favorited\":true}"), None);
        assert_eq!(parse_favorite_message(""), None);
    }

    #[test]
    fn test_backoff_increases_exponentially() {
        let p = ReconnectPolicy::default();
        let d0 = calculate_backoff(0, &p);
        let d1 = calculate_backoff(1, &p);
        let d2 = calculate_backoff(2, &p);
        assert!(d1 > d0, "d1 ({d1:?}) should be greater than d0 ({d0:?})");
        assert!(d2 > d1, "d2 ({d2:?}) should be greater than d1 ({d1:?})");
    }

    #[test]
    fn test_backoff_caps_at_max_delay() {
        let p = policy();
        for attempt in [10, 31, 1_000, u32::MAX] {
            let d = calculate_backoff(attempt, &p);
            assert!(d <= Duration::from_millis(12_500), "attempt {attempt}: {d:?}");
        }
    }

    #[test]
    fn test_supervisor_reconnects_after_unexpected_close() {
        let mut s = Supervisor::new(policy(), 0);
        assert!(!s.on_open());
        assert_eq!(s.status(), ChannelStatus::Open);

        let first = s.on_close(1_000).expect("should reconnect");
        let second = s.on_close(2_000).expect("should reconnect");
        assert!(second > first);
        assert_eq!(s.status(), ChannelStatus::Reconnecting);
        assert_eq!(s.attempt(), 2);

        assert!(s.on_open(), "reopen after a drop should resync");
        assert_eq!(s.attempt(), 0);
    }

    #[test]
    fn test_supervisor_does_not_reconnect_after_shutdown() {
        let mut s = Supervisor::new(policy(), 0);
        s.on_open();
        s.shutdown();
        assert_eq!(s.on_close(100), None);
        assert_eq!(s.status(), ChannelStatus::Closed);
        s.on_reconnect_attempt();
        assert_eq!(s.status(), ChannelStatus::Closed);
    }

    #[test]
    fn test_staleness_is_measured_from_start_of_outage() {
        let mut s = Supervisor::new(policy(), 0);
        assert!(!s.is_stale(4_999));
        assert!(s.is_stale(5_000), "never connected counts as down");

        s.on_open();
        assert!(!s.is_stale(60_000));

        s.on_close(10_000);
        s.on_close(12_000);
        assert!(!s.is_stale(14_999));
        assert!(s.is_stale(15_000));

        s.on_open();
        assert!(!s.is_stale(100_000));
    }

    #[test]
    fn test_shutdown_is_never_stale() {
        let mut s = Supervisor::new(policy(), 0);
        s.shutdown();
        assert!(!s.is_stale(1_000_000));
    }
}
