//! Embassy async tasks
//!
//! Each task runs independently; the only shared state is the epoch
//! reference in `channels`.

pub mod net;
pub mod refresh;
pub mod timesync;
pub mod wifi;

pub use net::net_task;
pub use refresh::refresh_task;
pub use timesync::timesync_task;
pub use wifi::wifi_task;
