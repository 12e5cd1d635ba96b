#![doc = include_str!("../README.md")]

pub mod access;
#[cfg(target_os = "linux")]
pub mod cards;
pub mod error;
pub mod interface;
pub mod mixer;
#[cfg(target_os = "linux")]
pub mod pcm;
pub mod scan;
pub mod soundcard;

#[cfg(test)]
mod test_util;

// Engine types needed to consume scan results
pub use dacscan_core::{
    ConfigurationBundle, ConfigurationSet, DiscoveryConfig, InterfaceError, InterfaceGroup,
    group_equivalent,
};
