mod consent;
mod dashboard;
mod favorites;
mod layout;
mod library_layout;
mod library_viewer;
mod listing_controls;
mod listing_grid;
mod open_content;
mod video_layout;
mod video_viewer;

pub(crate) use consent::ConsentPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use layout::RootAuthed;
pub(crate) use library_viewer::LibraryViewer;
pub(crate) use open_content::{OpenContentManagementPage, OpenContentPage};
pub(crate) use video_viewer::VideoViewer;
