//! Configuration types
//!
//! Board-agnostic configuration, fixed at build time. Each type has a
//! `DEFAULT` constant usable in `const` context and a matching
//! [`Default`] impl.

pub mod clock;
pub mod device;
pub mod ntp;

pub use clock::*;
pub use device::*;
pub use ntp::*;
