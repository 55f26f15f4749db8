//! Board-agnostic core logic for the Edgelit clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Digit encoding and display frames
//! - UTC/local time with daylight-saving rules
//! - Wrap-safe periodic scheduling
//! - The clock runner and its diagnostics
//! - Collaborator traits (display, time source, network link, maintenance)
//! - Configuration constants

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod display;
pub mod scheduler;
pub mod time;
pub mod traits;
