mod use_favorite;
mod use_fetch;
mod use_live_favorite;

pub(crate) use use_favorite::{favorite_toast_text, use_favorite, FavoriteHandle};
pub(crate) use use_fetch::use_fetch;
pub(crate) use use_live_favorite::{use_live_favorite, LiveFavorite};
