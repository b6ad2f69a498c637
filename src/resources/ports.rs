//! Harbour access and trade ratios.
//!
//! A 2:1 port for a kind beats the generic 3:1 port, which beats the 4:1
//! bank trade.

use serde::{Deserialize, Serialize};

use super::kind::{ResourceKind, TRADEABLE_COUNT};

/// Ratio for a kind-specific 2:1 port.
pub const PORT_RATIO: u32 = 2;

/// Ratio for the generic 3:1 port.
pub const MISC_PORT_RATIO: u32 = 3;

/// Ratio for a plain bank trade.
pub const BANK_RATIO: u32 = 4;

/// Which ports a player has access to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "NamedPorts", into = "NamedPorts")]
pub struct PortFlags {
    specific: [bool; TRADEABLE_COUNT],
    misc: bool,
}

impl PortFlags {
    /// No ports: every trade goes to the bank at 4:1.
    pub const NONE: PortFlags = PortFlags {
        specific: [false; TRADEABLE_COUNT],
        misc: false,
    };

    /// Returns a copy with the 2:1 port for `kind` enabled.
    ///
    /// `Unknown` has no port; passing it leaves the flags unchanged.
    pub fn with_port(mut self, kind: ResourceKind) -> Self {
        if kind.is_tradeable() {
            self.specific[kind.index()] = true;
        }
        self
    }

    /// Returns a copy with the generic 3:1 port enabled.
    pub fn with_misc_port(mut self) -> Self {
        self.misc = true;
        self
    }

    /// Returns true if a 2:1 port for `kind` is available.
    pub fn has_port(&self, kind: ResourceKind) -> bool {
        kind.is_tradeable() && self.specific[kind.index()]
    }

    /// Returns true if the generic 3:1 port is available.
    pub fn has_misc_port(&self) -> bool {
        self.misc
    }

    /// Returns how many units of `kind` must be given for one unit of anything else.
    #[inline]
    pub fn trade_ratio(&self, kind: ResourceKind) -> u32 {
        if self.has_port(kind) {
            PORT_RATIO
        } else {
            self.worst_ratio()
        }
    }

    /// Returns the ratio available for any kind, ignoring 2:1 ports.
    ///
    /// This is the rate at which cards of unobserved kind are valued.
    #[inline]
    pub fn worst_ratio(&self) -> u32 {
        if self.misc {
            MISC_PORT_RATIO
        } else {
            BANK_RATIO
        }
    }
}

/// Wire form of `PortFlags`: `{"ore": true, "misc": true}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NamedPorts {
    clay: bool,
    ore: bool,
    sheep: bool,
    wheat: bool,
    wood: bool,
    misc: bool,
}

impl From<NamedPorts> for PortFlags {
    fn from(n: NamedPorts) -> Self {
        PortFlags {
            specific: [n.clay, n.ore, n.sheep, n.wheat, n.wood],
            misc: n.misc,
        }
    }
}

impl From<PortFlags> for NamedPorts {
    fn from(p: PortFlags) -> Self {
        let [clay, ore, sheep, wheat, wood] = p.specific;
        NamedPorts {
            clay,
            ore,
            sheep,
            wheat,
            wood,
            misc: p.misc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_precedence() {
        let none = PortFlags::NONE;
        assert_eq!(none.trade_ratio(ResourceKind::Ore), 4);

        let misc = PortFlags::NONE.with_misc_port();
        assert_eq!(misc.trade_ratio(ResourceKind::Ore), 3);

        let both = misc.with_port(ResourceKind::Ore);
        assert_eq!(both.trade_ratio(ResourceKind::Ore), 2);
        assert_eq!(both.trade_ratio(ResourceKind::Wood), 3);
    }

    #[test]
    fn unknown_never_gets_a_port() {
        let ports = PortFlags::NONE.with_port(ResourceKind::Unknown);
        assert_eq!(ports, PortFlags::NONE);
        assert_eq!(ports.trade_ratio(ResourceKind::Unknown), 4);
    }

    #[test]
    fn json_form() {
        let ports: PortFlags = serde_json::from_str(r#"{"sheep": true, "misc": true}"#).unwrap();
        assert!(ports.has_port(ResourceKind::Sheep));
        assert!(!ports.has_port(ResourceKind::Clay));
        assert!(ports.has_misc_port());
        assert_eq!(ports.worst_ratio(), 3);
    }
}
