//! Extraction of the L1 fee parameters from L1 info transaction calldata.
//!
//! Used where the `L1Block` storage of the block is not available, e.g. when deriving receipts or
//! estimating fees in the transaction pool.
use crate::{
    constants::{
        BEDROCK_L1_INFO_LEN, BEDROCK_L1_INFO_SELECTOR, ECOTONE_L1_INFO_LEN,
        ECOTONE_L1_INFO_SELECTOR, FEE_SCALAR_DECIMAL,
    },
    BedrockFeeParams, EcotoneFeeParams, L1FeeParams, L1InfoError, RollupForks,
};
use alloy_primitives::{Bytes, U256};
use core::{fmt, str::FromStr};
use std::vec::Vec;

impl L1FeeParams {
    /// Extracts the L1 fee parameters from the calldata of the L1 info transaction of a block.
    ///
    /// For the very first Ecotone block the L1 info transaction still uses the Bedrock format,
    /// which is detected by its function selector.
    pub fn from_l1_info_calldata<F: RollupForks>(
        forks: &F,
        block_time: u64,
        data: &[u8],
    ) -> Result<Self, L1InfoError> {
        if forks.is_ecotone_active_at_timestamp(block_time)
            && data.len() >= 4
            && data[..4] != BEDROCK_L1_INFO_SELECTOR
        {
            return Self::from_ecotone_calldata(data);
        }

        Self::from_bedrock_calldata(data, forks.is_regolith_active_at_timestamp(block_time))
    }

    /// Extracts the L1 fee parameters for transaction pool fee estimation.
    ///
    /// The estimate always targets a new block, so Regolith is assumed to be active.
    pub fn from_tx_pool_calldata(data: &[u8]) -> Result<Self, L1InfoError> {
        if data.len() == ECOTONE_L1_INFO_LEN {
            Self::from_ecotone_calldata(data)
        } else {
            Self::from_bedrock_calldata(data, true)
        }
    }

    /// Parses `setL1BlockValues` calldata: the selector followed by 8 ABI encoded words.
    ///
    /// Bytes past the 8th word are ignored.
    pub fn from_bedrock_calldata(data: &[u8], is_regolith: bool) -> Result<Self, L1InfoError> {
        if data.len() < BEDROCK_L1_INFO_LEN {
            return Err(L1InfoError::InsufficientData {
                expected: BEDROCK_L1_INFO_LEN,
                got: data.len(),
            });
        }

        // trim function selector
        let words = &data[4..];
        let l1_base_fee = U256::from_be_slice(&words[32 * 2..32 * 3]);
        let l1_fee_overhead = U256::from_be_slice(&words[32 * 6..32 * 7]);
        let l1_fee_scalar = U256::from_be_slice(&words[32 * 7..32 * 8]);

        Ok(Self::Bedrock(BedrockFeeParams::new(
            l1_base_fee,
            l1_fee_overhead,
            l1_fee_scalar,
            is_regolith,
        )))
    }

    /// Parses `setL1BlockValuesEcotone` calldata.
    ///
    /// offset type varname
    /// 0      <selector>
    /// 4      uint32 _baseFeeScalar
    /// 8      uint32 _blobBaseFeeScalar
    /// 12     uint64 _sequenceNumber,
    /// 20     uint64 _timestamp,
    /// 28     uint64 _l1BlockNumber
    /// 36     uint256 _baseFee,
    /// 68     uint256 _blobBaseFee,
    /// 100    bytes32 _hash,
    /// 132    bytes32 _batcherHash,
    pub fn from_ecotone_calldata(data: &[u8]) -> Result<Self, L1InfoError> {
        if data.len() != ECOTONE_L1_INFO_LEN {
            return Err(L1InfoError::MalformedData {
                expected: ECOTONE_L1_INFO_LEN,
                got: data.len(),
            });
        }

        Ok(Self::Ecotone(EcotoneFeeParams::new(
            U256::from_be_slice(&data[36..68]),
            U256::from_be_slice(&data[68..100]),
            U256::from_be_slice(&data[4..8]),
            U256::from_be_slice(&data[8..12]),
        )))
    }

    /// Encodes the fee parameters as L1 info calldata. Fields unrelated to the fee are zeroed.
    ///
    /// Ecotone scalars saturate at their 32-bit calldata representation.
    pub fn to_l1_info_calldata(&self) -> Bytes {
        match self {
            Self::Bedrock(params) => {
                let mut buf = Vec::with_capacity(BEDROCK_L1_INFO_LEN);
                buf.extend_from_slice(&BEDROCK_L1_INFO_SELECTOR);
                // number, timestamp
                buf.extend_from_slice(&[0u8; 64]);
                buf.extend_from_slice(params.l1_base_fee.to_be_bytes::<32>().as_slice());
                // hash, sequence number, batcher hash
                buf.extend_from_slice(&[0u8; 96]);
                buf.extend_from_slice(params.l1_fee_overhead.to_be_bytes::<32>().as_slice());
                buf.extend_from_slice(params.l1_fee_scalar.to_be_bytes::<32>().as_slice());
                buf.into()
            }
            Self::Ecotone(params) => {
                let mut buf = Vec::with_capacity(ECOTONE_L1_INFO_LEN);
                buf.extend_from_slice(&ECOTONE_L1_INFO_SELECTOR);
                let base_fee_scalar: u32 = params.l1_base_fee_scalar.saturating_to();
                let blob_base_fee_scalar: u32 = params.l1_blob_base_fee_scalar.saturating_to();
                buf.extend_from_slice(&base_fee_scalar.to_be_bytes());
                buf.extend_from_slice(&blob_base_fee_scalar.to_be_bytes());
                // sequence number, timestamp, l1 block number
                buf.extend_from_slice(&[0u8; 24]);
                buf.extend_from_slice(params.l1_base_fee.to_be_bytes::<32>().as_slice());
                buf.extend_from_slice(params.l1_blob_base_fee.to_be_bytes::<32>().as_slice());
                // hash, batcher hash
                buf.extend_from_slice(&[0u8; 64]);
                buf.into()
            }
        }
    }

    /// The legacy fee scalar, `scalar / 1e6`. `None` for the Ecotone cost function.
    pub const fn fee_scalar(&self) -> Option<FeeScalar> {
        match self {
            Self::Bedrock(params) => Some(FeeScalar::from_raw(params.l1_fee_scalar)),
            Self::Ecotone(_) => None,
        }
    }
}

/// Decimal fee scalar with 6 digits of precision, as exposed by the `feeScalar` receipt field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeeScalar(U256);

impl FeeScalar {
    /// Creates the scalar from its raw fixed point value.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw fixed point value.
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Multiplies an integer by this scalar, rounding down.
    pub fn mul_floor(&self, value: U256) -> U256 {
        value
            .saturating_mul(self.0)
            .wrapping_div(U256::from(FEE_SCALAR_DECIMAL))
    }
}

impl fmt::Display for FeeScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimal = U256::from(FEE_SCALAR_DECIMAL);
        let integer = self.0 / decimal;
        let fraction = (self.0 % decimal).saturating_to::<u64>();
        if fraction == 0 {
            return write!(f, "{integer}");
        }

        let mut digits = [0u8; 6];
        let mut rest = fraction;
        for digit in digits.iter_mut().rev() {
            *digit = b'0' + (rest % 10) as u8;
            rest /= 10;
        }
        let len = digits.iter().rposition(|d| *d != b'0').map_or(0, |i| i + 1);
        // only ascii digits were written
        let digits = core::str::from_utf8(&digits[..len]).map_err(|_| fmt::Error)?;
        write!(f, "{integer}.{digits}")
    }
}

/// Error parsing a [`FeeScalar`] from a decimal string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid fee scalar")]
pub struct ParseFeeScalarError;

impl FromStr for FeeScalar {
    type Err = ParseFeeScalarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (integer, fraction) = match s.split_once('.') {
            // A dot must be followed by at least one digit.
            Some((_, "")) => return Err(ParseFeeScalarError),
            Some(parts) => parts,
            None => (s, ""),
        };
        if integer.is_empty()
            || fraction.len() > 6
            || !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(ParseFeeScalarError);
        }

        let integer = U256::from_str_radix(integer, 10).map_err(|_| ParseFeeScalarError)?;
        let mut fraction_value = 0u64;
        for i in 0..6 {
            let digit = fraction.as_bytes().get(i).map_or(0, |b| (b - b'0') as u64);
            fraction_value = fraction_value * 10 + digit;
        }

        integer
            .checked_mul(U256::from(FEE_SCALAR_DECIMAL))
            .and_then(|raw| raw.checked_add(U256::from(fraction_value)))
            .map(Self)
            .ok_or(ParseFeeScalarError)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FeeScalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FeeScalar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
