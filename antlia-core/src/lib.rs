//! Board-agnostic core logic for the water sampler firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Persisted settings store (pump offsets, shared runtime)
//! - Pump sequencing engine with scheduled-action queue
//! - Three-button edit protocol (cursor, deltas, commit-on-wrap)
//! - Discrete input event vocabulary and the analog button decoder
//! - Rig controller tying the pieces together
//! - Pump output trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod editor;
pub mod input;
pub mod sequence;
pub mod traits;
