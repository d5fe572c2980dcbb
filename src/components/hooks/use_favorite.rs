use crate::api::ApiResult;
use crate::cache::CacheContext;
use crate::state::favorite::FavoriteToggle;
use crate::state::{AppContext, ToastContext, ToastState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

pub(crate) fn favorite_toast_text(noun: &str, favorited: bool) -> String {
    if favorited {
        format!("{noun} added to favorites")
    } else {
        format!("{noun} removed from favorites")
    }
}

/// Optimistic favorite flag bound to one card or viewer.
#[derive(Clone, Copy)]
pub(crate) struct FavoriteHandle {
    state: RwSignal<FavoriteToggle>,
    noun: &'static str,
    invalidates: &'static [&'static str],
    cache: CacheContext,
    toast: ToastContext,
}

impl FavoriteHandle {
    pub fn favorited(&self) -> bool {
        self.state.with(|s| s.value())
    }

    pub fn pending(&self) -> bool {
        self.state.with(|s| s.is_pending())
    }

    pub fn favorited_untracked(&self) -> bool {
        self.state.with_untracked(|s| s.value())
    }

    /// Flip now, persist with `request(target)`, revert and toast on failure.
    /// Ignored while a previous toggle is still in flight.
    pub fn toggle<Fut>(&self, request: impl FnOnce(bool) -> Fut)
    where
        Fut: Future<Output = ApiResult<String>> + 'static,
    {
        let Some(ticket) = self.state.try_update(|s| s.begin()).flatten() else {
            tracing::debug!(noun = self.noun, "favorite toggle already pending");
            return;
        };
        let fut = request(ticket.target);
        let this = *self;

        spawn_local(async move {
            let result = fut.await;
            this.state.update(|s| {
                s.complete(ticket, result.is_ok());
            });

            match result {
                Ok(_) => {
                    this.toast
                        .toaster(favorite_toast_text(this.noun, ticket.target), ToastState::Success);
                    for path in this.invalidates {
                        this.cache.invalidate(path);
                    }
                }
                Err(e) => {
                    tracing::warn!(noun = this.noun, target = ticket.target, error = %e, "favorite toggle failed");
                    this.toast.toaster(e.user_message(), ToastState::Error);
                }
            }
        });
    }

    /// Authoritative value pushed over the live channel.
    pub fn apply_remote(&self, value: bool) {
        self.state.update(|s| s.apply_remote(value));
    }

    /// Fresh value from a refetch.
    pub fn reconcile(&self, value: bool) {
        self.state.update(|s| s.reconcile(value));
    }
}

pub(crate) fn use_favorite(
    initial: bool,
    noun: &'static str,
    invalidates: &'static [&'static str],
) -> FavoriteHandle {
    FavoriteHandle {
        state: RwSignal::new(FavoriteToggle::new(initial)),
        noun,
        invalidates,
        cache: expect_context::<AppContext>().0.cache,
        toast: expect_context::<ToastContext>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_toast_text() {
        assert_eq!(favorite_toast_text("Library", true), "Library added to favorites");
        assert_eq!(favorite_toast_text("Video", false), "Video removed from favorites");
    }
}
