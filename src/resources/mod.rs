//! Resource value types.
//!
//! Contains the resource kinds, kind-wise resource sets, and the port flags
//! that decide bank/port trade ratios.

pub mod kind;
pub mod ports;
pub mod set;

pub use kind::{ResourceKind, ALL_KINDS, RESOURCE_KIND_COUNT, TRADEABLE, TRADEABLE_COUNT};
pub use ports::{PortFlags, BANK_RATIO, MISC_PORT_RATIO, PORT_RATIO};
pub use set::ResourceSet;
