//! Snapshot synchronization between the admin client, the shared store and
//! spectators.
//!
//! Propagation is polling only: the admin pushes after every change and on a
//! timer, spectators fetch on a timer. The last write wins.

mod admin;
mod error;
mod http;
mod local;
mod poller;
mod retry;
mod transport;

pub use admin::spawn_admin_sync;
pub use error::SyncError;
pub use http::HttpTransport;
pub use local::LocalTransport;
pub use poller::{PollHandle, PollUpdate, spawn_spectator};
pub use retry::{RetryPolicy, join_game};
pub use transport::SyncTransport;
