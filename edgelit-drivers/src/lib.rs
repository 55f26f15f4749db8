//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in edgelit-core:
//!
//! - Display: cascaded shift registers driving the edge-lit digit panels

#![no_std]
#![deny(unsafe_code)]

pub mod display;
