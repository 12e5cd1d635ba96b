#![doc = include_str!("../README.md")]
#![allow(clippy::needless_range_loop)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod bits;
pub mod builder;
pub mod bundle;
pub mod candidate;
pub mod channel;
pub mod compact;
pub mod config_set;
pub mod discovery;
pub mod error;
pub mod format;
pub mod oracle;
pub mod rate;

#[cfg(test)]
mod test_util;

pub use bundle::{ConfigurationBundle, InterfaceGroup, InterfaceIdentity, group_equivalent};
pub use config_set::ConfigurationSet;
pub use discovery::{DiscoveryConfig, discover};
pub use error::{DiscoveryError, InterfaceError};
pub use oracle::{CapabilityOracle, CommitError};
