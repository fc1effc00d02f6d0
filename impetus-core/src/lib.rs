//! Board-agnostic core logic for the interval timer watch
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Timer state and the run-state machine
//! - Countdown engine (per-second tick, time rendering)
//! - Command interpreter (phone events to feedback and transitions)
//! - Haptic pattern tables
//! - Hardware abstraction traits (watch face, vibration, backlight, link)
//! - Controller and event loop plumbing
//! - Configuration types

// std only for the test harness (proptest needs it)
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod countdown;
pub mod feedback;
pub mod interpreter;
pub mod runtime;
pub mod state;
pub mod traits;
