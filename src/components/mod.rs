pub(crate) mod breadcrumbs;
pub(crate) mod favorite_card;
pub(crate) mod favorite_star;
pub(crate) mod helpful_link_card;
pub(crate) mod hooks;
pub(crate) mod library_card;
pub(crate) mod live_status;
pub(crate) mod open_content_card;
pub(crate) mod pagination;
pub(crate) mod resources_sidebar;
pub(crate) mod search_bar;
pub(crate) mod sort_by_pills;
pub(crate) mod static_content_card;
pub(crate) mod tab_view;
pub(crate) mod toaster;
pub(crate) mod ui;
pub(crate) mod video_card;
pub(crate) mod visible_hidden_toggle;
