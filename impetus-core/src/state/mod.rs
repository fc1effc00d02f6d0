//! Timer state and run-state machine
//!
//! The phone is the authority on the workout. The machine here only
//! mirrors what the phone reports, plus one local rule: a countdown that
//! reaches zero stops on its own.

pub mod events;
pub mod machine;
pub mod timer;

pub use events::{Event, MAX_EVENTS_PER_MESSAGE};
pub use machine::RunState;
pub use timer::TimerState;
