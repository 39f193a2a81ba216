use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize, Serializer};
use std::{collections::HashMap, fmt};

// linux/include/uapi/linux/if_addr.h
pub const IFA_F_SECONDARY: u64 = 0x01;
pub const IFA_F_TEMPORARY: u64 = IFA_F_SECONDARY;
pub const IFA_F_NODAD: u64 = 0x02;
pub const IFA_F_OPTIMISTIC: u64 = 0x04;
pub const IFA_F_DADFAILED: u64 = 0x08;
pub const IFA_F_HOMEADDRESS: u64 = 0x10;
pub const IFA_F_DEPRECATED: u64 = 0x20;
pub const IFA_F_TENTATIVE: u64 = 0x40;
pub const IFA_F_PERMANENT: u64 = 0x80;
pub const IFA_F_MANAGETEMPADDR: u64 = 0x100;
pub const IFA_F_NOPREFIXROUTE: u64 = 0x200;
pub const IFA_F_MCAUTOJOIN: u64 = 0x400;
pub const IFA_F_STABLE_PRIVACY: u64 = 0x800;

const NIBBLE_MASKS: [u64; 3] = [0x00f, 0x0f0, 0xf00];

/// Address lifecycle/configuration flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    Secondary,
    NoDad,
    Optimistic,
    DadFailed,
    HomeAddress,
    Deprecated,
    Tentative,
    Permanent,
    ManageTempAddr,
    NoPrefixRoute,
    McAutoJoin,
    StablePrivacy,
}

pub static FLAGS: Lazy<HashMap<u64, Flag>> = Lazy::new(|| {
    use Flag::*;
    [
        Secondary,
        NoDad,
        Optimistic,
        DadFailed,
        HomeAddress,
        Deprecated,
        Tentative,
        Permanent,
        ManageTempAddr,
        NoPrefixRoute,
        McAutoJoin,
        StablePrivacy,
    ]
    .into_iter()
    .map(|flag| (flag.value(), flag))
    .collect()
});

impl Flag {
    pub fn value(&self) -> u64 {
        use Flag::*;
        match self {
            Secondary => IFA_F_SECONDARY,
            NoDad => IFA_F_NODAD,
            Optimistic => IFA_F_OPTIMISTIC,
            DadFailed => IFA_F_DADFAILED,
            HomeAddress => IFA_F_HOMEADDRESS,
            Deprecated => IFA_F_DEPRECATED,
            Tentative => IFA_F_TENTATIVE,
            Permanent => IFA_F_PERMANENT,
            ManageTempAddr => IFA_F_MANAGETEMPADDR,
            NoPrefixRoute => IFA_F_NOPREFIXROUTE,
            McAutoJoin => IFA_F_MCAUTOJOIN,
            StablePrivacy => IFA_F_STABLE_PRIVACY,
        }
    }

    pub fn label(&self) -> &'static str {
        use Flag::*;
        match self {
            Secondary => "Secondary/Temporary",
            NoDad => "NoDAD",
            Optimistic => "Optimistic",
            DadFailed => "DADFailed",
            HomeAddress => "HomeAddress",
            Deprecated => "Deprecated",
            Tentative => "Tentative",
            Permanent => "Permanent",
            ManageTempAddr => "ManageTempAddr",
            NoPrefixRoute => "NoPrefixRoute",
            McAutoJoin => "MCAutoJoin",
            StablePrivacy => "StablePrivacy",
        }
    }

    pub fn lookup(value: u64) -> Option<Self> {
        FLAGS.get(&value).copied()
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// How a flags word is split into labels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagMode {
    /// The low 12 bits form three nibbles, each looked up as a whole.
    /// A nibble with more than one bit set matches nothing and is dropped.
    #[default]
    Nibble,
    /// Every known bit is reported on its own, lowest bit first.
    Bits,
}

pub fn decode_flags(word: u64, mode: FlagMode) -> Vec<Flag> {
    // Both modes go through the same value table. Nibble looks up a masked
    // group, which may hold several bits; Bits looks up one bit at a time.
    match mode {
        FlagMode::Nibble => NIBBLE_MASKS
            .iter()
            .map(|mask| word & mask)
            .filter(|nibble| *nibble != 0)
            .filter_map(Flag::lookup)
            .collect(),
        FlagMode::Bits => (0..u64::BITS)
            .map(|bit| word & (1u64 << bit))
            .filter(|v| *v != 0)
            .filter_map(Flag::lookup)
            .collect(),
    }
}
