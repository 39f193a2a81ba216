use serde::{Serialize, Serializer};
use std::fmt;

// linux/include/net/ipv6.h
pub const IPV6_ADDR_SCOPE_GLOBAL: u64 = 0x00;
pub const IPV6_ADDR_SCOPE_NODELOCAL: u64 = 0x10;
pub const IPV6_ADDR_SCOPE_LINKLOCAL: u64 = 0x20;
pub const IPV6_ADDR_SCOPE_SITELOCAL: u64 = 0x40;
pub const IPV6_ADDR_SCOPE_COMPATV4: u64 = 0x80;

/// Routing visibility of an address, as encoded in the kernel scope byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    NodeLocal,
    LinkLocal,
    SiteLocal,
    CompatV4,
    Unknown,
}

impl Scope {
    /// Classifies a raw scope code. Codes other than the five known ones
    /// are `Unknown`, never an error.
    pub fn from_code(code: u64) -> Self {
        match code {
            IPV6_ADDR_SCOPE_GLOBAL => Scope::Global,
            IPV6_ADDR_SCOPE_NODELOCAL => Scope::NodeLocal,
            IPV6_ADDR_SCOPE_LINKLOCAL => Scope::LinkLocal,
            IPV6_ADDR_SCOPE_SITELOCAL => Scope::SiteLocal,
            IPV6_ADDR_SCOPE_COMPATV4 => Scope::CompatV4,
            _ => Scope::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scope::Global => "Global",
            Scope::NodeLocal => "NodeLocal",
            Scope::LinkLocal => "LinkLocal",
            Scope::SiteLocal => "SiteLocal",
            Scope::CompatV4 => "CompatV4",
            Scope::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
