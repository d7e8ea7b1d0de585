//! CLI command handlers, one per file.

mod add;
mod export_icon;
mod list;
mod remove;
mod resolve;
mod serve;
mod update;

pub use add::run_add;
pub use export_icon::run_export_icon;
pub use list::run_list;
pub use remove::run_remove;
pub use resolve::run_resolve;
pub use serve::run_serve;
pub use update::run_update;
