//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod display_rx;
pub mod display_tx;
pub mod float_switch;
pub mod pumps;
pub mod storage;
pub mod tick;

pub use buttons::buttons_task;
pub use controller::controller_task;
pub use display_rx::display_rx_task;
pub use display_tx::display_tx_task;
pub use float_switch::float_switch_task;
pub use pumps::pumps_task;
pub use storage::storage_task;
pub use tick::tick_task;
