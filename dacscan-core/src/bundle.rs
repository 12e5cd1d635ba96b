use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{config_set::ConfigurationSet, error::InterfaceError};

/// Where an interface lives and what the host calls it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceIdentity {
    pub interface_name: String,
    pub device_name: String,
    pub subdevice_name: String,
    pub card_number: u32,
    pub device_number: u32,
    pub subdevice_number: u32,
}

/// Everything discovered about one interface.
#[derive(Debug, Clone)]
pub struct ConfigurationBundle {
    identity: InterfaceIdentity,
    sets: Vec<ConfigurationSet>,
    error_status: Option<InterfaceError>,
    already_handled: bool,
}

impl ConfigurationBundle {
    /// A successfully discovered interface. `sets` may contain absorbed sets.
    pub fn new(identity: InterfaceIdentity, sets: Vec<ConfigurationSet>) -> Self {
        Self {
            identity,
            sets,
            error_status: None,
            already_handled: false,
        }
    }

    /// An interface whose discovery stopped. It describes no configurations.
    pub fn failed(identity: InterfaceIdentity, error: InterfaceError) -> Self {
        Self {
            identity,
            sets: Vec::new(),
            error_status: Some(error),
            already_handled: false,
        }
    }

    pub fn identity(&self) -> &InterfaceIdentity {
        &self.identity
    }

    pub fn interface_name(&self) -> &str {
        &self.identity.interface_name
    }

    pub fn error_status(&self) -> Option<&InterfaceError> {
        self.error_status.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error_status.is_none()
    }

    /// Configuration sets still describing something, in discovery order.
    pub fn live_sets(&self) -> impl Iterator<Item = &ConfigurationSet> {
        self.sets.iter().filter(|s| s.is_live())
    }

    pub fn live_set_count(&self) -> usize {
        self.live_sets().count()
    }

    /// Whether two interfaces present the same capabilities.
    ///
    /// Both must have been discovered successfully on the same device number. Live sets are
    /// compared pairwise in discovery order, so two interfaces are only found equal when
    /// discovery visited them in the same order.
    pub fn equivalent(&self, other: &ConfigurationBundle) -> bool {
        if let Some(e) = &self.error_status {
            debug!("{}: {e}", self.identity.interface_name);
            return false;
        }
        if let Some(e) = &other.error_status {
            debug!("{}: {e}", other.identity.interface_name);
            return false;
        }
        self.identity.device_number == other.identity.device_number
            && self.live_set_count() == other.live_set_count()
            && self
                .live_sets()
                .zip(other.live_sets())
                .all(|(a, b)| a.equivalent(b))
    }

    pub fn already_handled(&self) -> bool {
        self.already_handled
    }

    pub fn set_already_handled(&mut self, handled: bool) {
        self.already_handled = handled;
    }
}

/// Interfaces reported together because they present the same capabilities.
#[derive(Debug)]
pub struct InterfaceGroup<'a> {
    pub primary: &'a ConfigurationBundle,
    pub aliases: Vec<&'a ConfigurationBundle>,
}

impl<'a> InterfaceGroup<'a> {
    /// Primary first, then aliases in discovery order.
    pub fn members(&self) -> impl Iterator<Item = &'a ConfigurationBundle> + '_ {
        core::iter::once(self.primary).chain(self.aliases.iter().copied())
    }
}

/// Group a card's bundles for reporting.
///
/// Bundles are visited in order. Each successful bundle not yet handled collects every later
/// unhandled bundle equivalent to it and marks them handled. Failed bundles are reported on
/// their own. Interfaces that turned out not to exist are left out entirely.
pub fn group_equivalent(bundles: &mut [ConfigurationBundle]) -> Vec<InterfaceGroup<'_>> {
    for b in bundles.iter_mut() {
        b.set_already_handled(false);
    }

    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for i in 0..bundles.len() {
        let missing = bundles[i].error_status() == Some(&InterfaceError::NotFound);
        if missing || bundles[i].already_handled() {
            continue;
        }
        bundles[i].set_already_handled(true);
        let mut aliases = Vec::new();
        if bundles[i].is_success() {
            for j in (i + 1)..bundles.len() {
                if !bundles[j].already_handled() && bundles[i].equivalent(&bundles[j]) {
                    bundles[j].set_already_handled(true);
                    aliases.push(j);
                }
            }
        }
        groups.push((i, aliases));
    }

    let bundles: &[ConfigurationBundle] = bundles;
    groups
        .into_iter()
        .map(|(primary, aliases)| InterfaceGroup {
            primary: &bundles[primary],
            aliases: aliases.into_iter().map(|j| &bundles[j]).collect(),
        })
        .collect()
}
