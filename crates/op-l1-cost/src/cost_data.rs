//! Byte composition of a transaction payload.
use crate::constants::{
    BEDROCK_SIGNATURE_PADDING, DEPOSIT_TRANSACTION_TYPE, NON_ZERO_BYTE_COST, ZERO_BYTE_COST,
};
use alloy_primitives::U256;

/// Count of zero and non-zero bytes of a transaction payload.
///
/// The zero value means "no cost data", e.g. for deposit transactions or RPC simulated calls, and
/// is never charged an L1 fee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollupCostData {
    /// Number of zero bytes.
    pub zeroes: u64,
    /// Number of non-zero bytes.
    pub ones: u64,
}

impl RollupCostData {
    /// Scans the given payload.
    pub fn from_calldata(data: &[u8]) -> Self {
        data.iter().fold(Self::default(), |mut acc, byte| {
            if *byte == 0x00 {
                acc.zeroes += 1;
            } else {
                acc.ones += 1;
            }
            acc
        })
    }

    /// Scans an EIP-2718 encoded transaction. Deposit transactions carry no cost data.
    pub fn from_encoded_tx(encoded: &[u8]) -> Self {
        if encoded.first() == Some(&DEPOSIT_TRANSACTION_TYPE) {
            return Self::default();
        }
        Self::from_calldata(encoded)
    }

    /// Returns `true` if this is the "no cost data" value.
    pub const fn is_empty(&self) -> bool {
        self.zeroes == 0 && self.ones == 0
    }

    /// Calldata gas of the payload.
    ///
    /// Prior to regolith, an extra 68 non-zero bytes were included in the rollup data costs to
    /// account for the empty signature.
    pub fn data_gas(&self, is_regolith: bool) -> U256 {
        let ones = if is_regolith {
            U256::from(self.ones)
        } else {
            U256::from(self.ones).saturating_add(U256::from(BEDROCK_SIGNATURE_PADDING))
        };

        U256::from(self.zeroes)
            .saturating_mul(U256::from(ZERO_BYTE_COST))
            .saturating_add(ones.saturating_mul(U256::from(NON_ZERO_BYTE_COST)))
    }
}

impl From<&[u8]> for RollupCostData {
    fn from(data: &[u8]) -> Self {
        Self::from_calldata(data)
    }
}
