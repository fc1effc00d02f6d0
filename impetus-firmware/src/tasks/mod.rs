//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod backlight;
pub mod buttons;
pub mod controller;
pub mod haptics;
pub mod link_rx;
pub mod link_tx;
pub mod tick;

pub use backlight::backlight_task;
pub use buttons::button_task;
pub use controller::controller_task;
pub use haptics::haptics_task;
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use tick::tick_task;
