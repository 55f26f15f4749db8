//! Display encoding
//!
//! Maps decimal digits onto the scrambled plate wiring and groups four of
//! them into a frame that can only be pushed in the right order.

pub mod encoder;
pub mod frame;

pub use encoder::{decode, encode, BitPattern, Digit, BITS_PER_DIGIT};
pub use frame::DisplayFrame;
