//! Hardfork ordering and activation schedule relevant to the L1 cost function.
use auto_impl::auto_impl;
use core::{fmt, str::FromStr};

/// OP Stack hardforks that change the L1 data fee formula.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum OpSpecId {
    BEDROCK = 100,
    REGOLITH,
    #[default]
    ECOTONE,
}

impl OpSpecId {
    /// Returns `true` if `other` is activated at or before this hardfork.
    pub const fn is_enabled_in(self, other: OpSpecId) -> bool {
        other as u8 <= self as u8
    }
}

/// String identifiers for OP hardforks, as used in chain configurations.
pub mod name {
    /// Bedrock, the first OP Stack release.
    pub const BEDROCK: &str = "Bedrock";
    /// Regolith, which removed the signature padding from the L1 cost.
    pub const REGOLITH: &str = "Regolith";
    /// Ecotone, which introduced the blob based L1 cost function.
    pub const ECOTONE: &str = "Ecotone";
}

/// Returned when a hardfork name is not known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown hardfork")]
pub struct UnknownHardfork;

impl FromStr for OpSpecId {
    type Err = UnknownHardfork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            name::BEDROCK => Ok(OpSpecId::BEDROCK),
            name::REGOLITH => Ok(OpSpecId::REGOLITH),
            name::ECOTONE => Ok(OpSpecId::ECOTONE),
            _ => Err(UnknownHardfork),
        }
    }
}

impl From<OpSpecId> for &'static str {
    fn from(spec_id: OpSpecId) -> Self {
        match spec_id {
            OpSpecId::BEDROCK => name::BEDROCK,
            OpSpecId::REGOLITH => name::REGOLITH,
            OpSpecId::ECOTONE => name::ECOTONE,
        }
    }
}

impl fmt::Display for OpSpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

/// Timestamp based hardfork activation, supplied by the chain configuration.
#[auto_impl(&, Box, Arc)]
pub trait RollupForks {
    /// Returns `true` if Regolith is active at the given block timestamp.
    fn is_regolith_active_at_timestamp(&self, timestamp: u64) -> bool;

    /// Returns `true` if Ecotone is active at the given block timestamp.
    fn is_ecotone_active_at_timestamp(&self, timestamp: u64) -> bool;

    /// Returns the latest [`OpSpecId`] active at the given block timestamp.
    fn spec_at(&self, timestamp: u64) -> OpSpecId {
        if self.is_ecotone_active_at_timestamp(timestamp) {
            OpSpecId::ECOTONE
        } else if self.is_regolith_active_at_timestamp(timestamp) {
            OpSpecId::REGOLITH
        } else {
            OpSpecId::BEDROCK
        }
    }
}

/// Activation timestamps of the rollup hardforks, as found in a rollup config.
///
/// A missing timestamp means the fork is not scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForkSchedule {
    /// Regolith activation timestamp.
    pub regolith_time: Option<u64>,
    /// Ecotone activation timestamp.
    pub ecotone_time: Option<u64>,
}

impl ForkSchedule {
    /// Schedule with every fork active from genesis.
    pub const fn all_active() -> Self {
        Self {
            regolith_time: Some(0),
            ecotone_time: Some(0),
        }
    }

    /// Schedule with only the given forks active from genesis, the rest unscheduled.
    pub const fn active_at_genesis(spec_id: OpSpecId) -> Self {
        Self {
            regolith_time: if spec_id.is_enabled_in(OpSpecId::REGOLITH) {
                Some(0)
            } else {
                None
            },
            ecotone_time: if spec_id.is_enabled_in(OpSpecId::ECOTONE) {
                Some(0)
            } else {
                None
            },
        }
    }
}

impl RollupForks for ForkSchedule {
    fn is_regolith_active_at_timestamp(&self, timestamp: u64) -> bool {
        self.regolith_time.is_some_and(|time| time <= timestamp)
    }

    fn is_ecotone_active_at_timestamp(&self, timestamp: u64) -> bool {
        self.ecotone_time.is_some_and(|time| time <= timestamp)
    }
}
