//! Turning VNode descriptions into live nodes and keeping them in sync.

mod materialize;
mod patch;

pub use materialize::materialize;
pub use patch::patch;
pub(crate) use patch::run_mount;
