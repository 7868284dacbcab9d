//! Note commands: the list screen and the edit screen.

mod delete;
mod edit;
mod list;
mod new;
mod show;

pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use new::handle_new;
pub use show::handle_show;
