//! Port resolution
//!
//! Maps symbolic port names to 16-bit bus addresses. The table is built once
//! (defaults or configuration) and only read afterwards.

use std::collections::BTreeMap;

use iostim_parser::parse_integer_literal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default VDP port table.
pub const DEFAULT_PORTS: [(&str, u16); 4] = [
    ("vdp_io0", 0x88),
    ("vdp_io1", 0x89),
    ("vdp_io2", 0x8A),
    ("vdp_io3", 0x8B),
];

/// Neither a known port name nor an integer that fits in 16 bits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid port '{token}'")]
pub struct UnknownPort {
    pub token: String,
}

/// Symbolic port table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortMap {
    ports: BTreeMap<String, u16>,
}

impl Default for PortMap {
    fn default() -> Self {
        DEFAULT_PORTS.iter().copied().collect()
    }
}

impl FromIterator<(String, u16)> for PortMap {
    fn from_iter<T: IntoIterator<Item = (String, u16)>>(iter: T) -> Self {
        Self {
            ports: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, u16)> for PortMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, u16)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(name, port)| (name.to_string(), port))
            .collect()
    }
}

impl PortMap {
    /// Resolve a port token: symbolic name first, then integer literal.
    ///
    /// # Example
    ///
    /// ```
    /// use iostim::ports::PortMap;
    ///
    /// let ports = PortMap::default();
    /// assert_eq!(ports.resolve("vdp_io0"), Ok(0x88));
    /// assert_eq!(ports.resolve("0x8A"), Ok(0x8A));
    /// assert!(ports.resolve("not_a_port").is_err());
    /// ```
    pub fn resolve(&self, token: &str) -> Result<u16, UnknownPort> {
        let token = token.trim();
        if let Some(port) = self.ports.get(token) {
            return Ok(*port);
        }
        parse_integer_literal(token)
            .and_then(|value| u16::try_from(value).ok())
            .ok_or_else(|| UnknownPort {
                token: token.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Iterate over `(name, address)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.ports.iter().map(|(name, port)| (name.as_str(), *port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let ports = PortMap::default();
        assert_eq!(ports.len(), 4);
        assert_eq!(ports.resolve("vdp_io0"), Ok(0x88));
        assert_eq!(ports.resolve("vdp_io1"), Ok(0x89));
        assert_eq!(ports.resolve("vdp_io2"), Ok(0x8A));
        assert_eq!(ports.resolve("vdp_io3"), Ok(0x8B));
    }

    #[test]
    fn test_numeric_ports() {
        let ports = PortMap::default();
        assert_eq!(ports.resolve("0x8A"), Ok(0x8A));
        assert_eq!(ports.resolve("0X10"), Ok(0x10));
        assert_eq!(ports.resolve("136"), Ok(136));
        assert_eq!(ports.resolve("0xFFFF"), Ok(0xFFFF));
    }

    #[test]
    fn test_invalid_ports() {
        let ports = PortMap::default();
        for token in ["not_a_port", "0x10000", "-1", "vdp_io4", ""] {
            assert_eq!(
                ports.resolve(token),
                Err(UnknownPort {
                    token: token.to_string()
                }),
                "{:?}",
                token
            );
        }
    }

    #[test]
    fn test_custom_table_replaces_defaults() {
        let ports: PortMap = [("psg_addr", 0xA0u16)].into_iter().collect();
        assert_eq!(ports.resolve("psg_addr"), Ok(0xA0));
        assert!(ports.resolve("vdp_io0").is_err());
        assert_eq!(ports.iter().collect::<Vec<_>>(), vec![("psg_addr", 0xA0)]);
    }
}
