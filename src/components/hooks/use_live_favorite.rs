use super::FavoriteHandle;
use crate::live::{ChannelStatus, FavoriteChannel};
use crate::state::AppContext;
use leptos::prelude::*;

/// Status of the viewer's live favorite channel.
#[derive(Clone, Copy)]
pub(crate) struct LiveFavorite {
    pub status: Signal<ChannelStatus>,
    pub stale: Signal<bool>,
}

/// Open the favorite channel for the mounted viewer and close it on unmount.
///
/// Pushed values are applied to `favorite` in arrival order. `on_resync` runs
/// after every reconnect so missed pushes are recovered by a refetch.
pub(crate) fn use_live_favorite(
    favorite: FavoriteHandle,
    on_resync: impl Fn() + 'static,
) -> LiveFavorite {
    let config = expect_context::<AppContext>().0.config;

    let channel = FavoriteChannel::connect(
        config.ws_url.clone(),
        config.reconnect_policy(),
        move |value| favorite.apply_remote(value),
        on_resync,
    );
    let status = channel.status;
    let stale = channel.stale;

    let channel = StoredValue::new_local(channel);
    on_cleanup(move || {
        channel.try_with_value(|c| c.close());
    });

    LiveFavorite {
        status: status.into(),
        stale: stale.into(),
    }
}
