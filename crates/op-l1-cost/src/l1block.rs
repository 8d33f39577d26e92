//! Contains the [`L1FeeParams`] type and its implementation.
use crate::{
    constants::{
        BASE_FEE_SCALAR_OFFSET, BLOB_BASE_FEE_SCALAR_OFFSET, ECOTONE_DIVISOR,
        ECOTONE_L1_BLOB_BASE_FEE_SLOT, ECOTONE_L1_FEE_SCALARS_SLOT, EMPTY_SCALARS,
        FEE_SCALAR_DECIMAL, L1_BASE_FEE_SLOT, L1_BLOCK_CONTRACT, L1_OVERHEAD_SLOT, L1_SCALAR_SLOT,
        NON_ZERO_BYTE_COST,
    },
    RollupCostData, RollupForks, StateGetter,
};
use alloy_primitives::U256;
use tracing::info;

/// L1 data fee charged for a transaction, together with the L1 gas it was charged for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1Cost {
    /// The L1 data fee.
    pub fee: U256,
    /// The L1 gas used. Includes the fee overhead prior to Ecotone.
    pub gas_used: U256,
}

/// Cost function parameters for Bedrock and Regolith blocks, and for the very first Ecotone
/// block.
///
/// These are the values set by `setL1BlockValues`:
///
/// setL1BlockValues(uint64 _number, uint64 _timestamp, uint256 _basefee, bytes32 _hash,
/// uint64 _sequenceNumber, bytes32 _batcherHash, uint256 _l1FeeOverhead, uint256 _l1FeeScalar)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BedrockFeeParams {
    /// The base fee of the L1 origin block.
    pub l1_base_fee: U256,
    /// The L1 fee overhead, in L1 gas.
    pub l1_fee_overhead: U256,
    /// The L1 fee scalar, with 6 decimals.
    pub l1_fee_scalar: U256,
    /// Whether Regolith is active, which removes the 68 bytes signature padding.
    pub is_regolith: bool,
}

impl BedrockFeeParams {
    pub const fn new(
        l1_base_fee: U256,
        l1_fee_overhead: U256,
        l1_fee_scalar: U256,
        is_regolith: bool,
    ) -> Self {
        Self {
            l1_base_fee,
            l1_fee_overhead,
            l1_fee_scalar,
            is_regolith,
        }
    }

    /// Calculate the L1 cost of a transaction, pre-Ecotone.
    ///
    /// `l1GasUsed = calldataGas + overhead`
    /// `l1Fee = l1GasUsed * l1BaseFee * scalar / 1e6`
    pub fn l1_cost(&self, data: RollupCostData) -> Option<L1Cost> {
        // Do not charge if there is no rollup cost data (e.g. RPC call or deposit).
        if data.is_empty() {
            return None;
        }

        let gas_used = data
            .data_gas(self.is_regolith)
            .saturating_add(self.l1_fee_overhead);
        let fee = l1_cost_bedrock_inner(gas_used, self.l1_base_fee, self.l1_fee_scalar);

        Some(L1Cost { fee, gas_used })
    }

    /// Calculate the L1 fee of a transaction, pre-Ecotone. Returns `None` if no L1 fee is charged.
    pub fn l1_fee(&self, data: RollupCostData) -> Option<U256> {
        self.l1_cost(data).map(|cost| cost.fee)
    }
}

/// Cost function parameters for Ecotone blocks, as set by `setL1BlockValuesEcotone`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcotoneFeeParams {
    /// The base fee of the L1 origin block.
    pub l1_base_fee: U256,
    /// The blob base fee of the L1 origin block.
    pub l1_blob_base_fee: U256,
    /// The 32-bit base fee scalar.
    pub l1_base_fee_scalar: U256,
    /// The 32-bit blob base fee scalar.
    pub l1_blob_base_fee_scalar: U256,
}

impl EcotoneFeeParams {
    pub const fn new(
        l1_base_fee: U256,
        l1_blob_base_fee: U256,
        l1_base_fee_scalar: U256,
        l1_blob_base_fee_scalar: U256,
    ) -> Self {
        Self {
            l1_base_fee,
            l1_blob_base_fee,
            l1_base_fee_scalar,
            l1_blob_base_fee_scalar,
        }
    }

    /// Calculate the L1 cost of a transaction, post-Ecotone.
    ///
    /// [crate::OpSpecId::ECOTONE] L1 cost function:
    /// `(calldataGas/16)*(l1BaseFee*16*l1BaseFeeScalar + l1BlobBaseFee*l1BlobBaseFeeScalar)/1e6`
    ///
    /// We divide "calldataGas" by 16 to change from units of calldata gas to "estimated # of bytes when compressed".
    /// Known as "compressedTxSize".
    ///
    /// Function is actually computed as follows for better precision under integer arithmetic:
    /// `calldataGas*(l1BaseFee*16*l1BaseFeeScalar + l1BlobBaseFee*l1BlobBaseFeeScalar)/16e6`
    pub fn l1_cost(&self, data: RollupCostData) -> Option<L1Cost> {
        if data.is_empty() {
            return None;
        }

        let gas_used = data.data_gas(true);
        let fee = self
            .l1_fee_scaled()
            .saturating_mul(gas_used)
            .wrapping_div(U256::from(ECOTONE_DIVISOR));

        Some(L1Cost { fee, gas_used })
    }

    /// Calculate the L1 fee of a transaction, post-Ecotone. Returns `None` if no L1 fee is charged.
    pub fn l1_fee(&self, data: RollupCostData) -> Option<U256> {
        self.l1_cost(data).map(|cost| cost.fee)
    }

    // l1BaseFee*16*l1BaseFeeScalar + l1BlobBaseFee*l1BlobBaseFeeScalar
    fn l1_fee_scaled(&self) -> U256 {
        let calldata_cost_per_byte = self
            .l1_base_fee
            .saturating_mul(U256::from(NON_ZERO_BYTE_COST))
            .saturating_mul(self.l1_base_fee_scalar);
        let blob_cost_per_byte = self
            .l1_blob_base_fee
            .saturating_mul(self.l1_blob_base_fee_scalar);

        calldata_cost_per_byte.saturating_add(blob_cost_per_byte)
    }
}

/// The L1 cost function of a block.
///
/// A snapshot of the `L1Block` oracle values, taken once per block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum L1FeeParams {
    /// Bedrock and Regolith cost function. Also used for the first Ecotone block.
    Bedrock(BedrockFeeParams),
    /// Ecotone cost function.
    Ecotone(EcotoneFeeParams),
}

impl L1FeeParams {
    /// Try to fetch the L1 fee parameters from the state.
    ///
    /// Must only be called once the deposit transactions of the block were applied, as they may
    /// update the very slots read here.
    pub fn try_fetch<S: StateGetter, F: RollupForks>(
        state: &mut S,
        forks: &F,
        block_time: u64,
    ) -> Result<L1FeeParams, S::Error> {
        if !forks.is_ecotone_active_at_timestamp(block_time) {
            return Self::try_fetch_bedrock(state, forks, block_time);
        }

        let l1_blob_base_fee = state.storage(L1_BLOCK_CONTRACT, ECOTONE_L1_BLOB_BASE_FEE_SLOT)?;
        let l1_fee_scalars = state
            .storage(L1_BLOCK_CONTRACT, ECOTONE_L1_FEE_SCALARS_SLOT)?
            .to_be_bytes::<32>();

        // There is an edgecase where, for the very first Ecotone block (unless it is activated at
        // Genesis), we must use the Bedrock cost function. To determine if this is the case, we
        // check if the Ecotone parameters are unset.
        if l1_blob_base_fee.is_zero()
            && l1_fee_scalars[BASE_FEE_SCALAR_OFFSET..BLOB_BASE_FEE_SCALAR_OFFSET + 4]
                == EMPTY_SCALARS
        {
            info!(target: "l1_cost", block_time, "using bedrock l1 cost func for first Ecotone block");
            return Self::try_fetch_bedrock(state, forks, block_time);
        }

        let l1_base_fee = state.storage(L1_BLOCK_CONTRACT, L1_BASE_FEE_SLOT)?;
        let l1_base_fee_scalar = U256::from_be_slice(
            l1_fee_scalars[BASE_FEE_SCALAR_OFFSET..BASE_FEE_SCALAR_OFFSET + 4].as_ref(),
        );
        let l1_blob_base_fee_scalar = U256::from_be_slice(
            l1_fee_scalars[BLOB_BASE_FEE_SCALAR_OFFSET..BLOB_BASE_FEE_SCALAR_OFFSET + 4].as_ref(),
        );

        Ok(L1FeeParams::Ecotone(EcotoneFeeParams::new(
            l1_base_fee,
            l1_blob_base_fee,
            l1_base_fee_scalar,
            l1_blob_base_fee_scalar,
        )))
    }

    fn try_fetch_bedrock<S: StateGetter, F: RollupForks>(
        state: &mut S,
        forks: &F,
        block_time: u64,
    ) -> Result<L1FeeParams, S::Error> {
        let l1_base_fee = state.storage(L1_BLOCK_CONTRACT, L1_BASE_FEE_SLOT)?;
        let l1_fee_overhead = state.storage(L1_BLOCK_CONTRACT, L1_OVERHEAD_SLOT)?;
        let l1_fee_scalar = state.storage(L1_BLOCK_CONTRACT, L1_SCALAR_SLOT)?;

        Ok(L1FeeParams::Bedrock(BedrockFeeParams::new(
            l1_base_fee,
            l1_fee_overhead,
            l1_fee_scalar,
            forks.is_regolith_active_at_timestamp(block_time),
        )))
    }

    /// Calculate the L1 cost of a transaction. Returns `None` if no L1 fee is charged.
    pub fn l1_cost(&self, data: RollupCostData) -> Option<L1Cost> {
        match self {
            Self::Bedrock(params) => params.l1_cost(data),
            Self::Ecotone(params) => params.l1_cost(data),
        }
    }

    /// Calculate the L1 fee of a transaction. Returns `None` if no L1 fee is charged.
    pub fn l1_fee(&self, data: RollupCostData) -> Option<U256> {
        self.l1_cost(data).map(|cost| cost.fee)
    }

    /// The base fee of the L1 origin block, exposed as `l1GasPrice` in receipts.
    pub const fn l1_base_fee(&self) -> U256 {
        match self {
            Self::Bedrock(params) => params.l1_base_fee,
            Self::Ecotone(params) => params.l1_base_fee,
        }
    }

    /// Returns `true` if this is the Ecotone cost function.
    pub const fn is_ecotone(&self) -> bool {
        matches!(self, Self::Ecotone(_))
    }
}

impl From<BedrockFeeParams> for L1FeeParams {
    fn from(params: BedrockFeeParams) -> Self {
        Self::Bedrock(params)
    }
}

impl From<EcotoneFeeParams> for L1FeeParams {
    fn from(params: EcotoneFeeParams) -> Self {
        Self::Ecotone(params)
    }
}

/// Computes the L1 data fee of a transaction in blocks prior to Ecotone from its rollup data gas.
pub fn bedrock_l1_cost(
    rollup_data_gas: u64,
    l1_base_fee: U256,
    l1_fee_overhead: U256,
    l1_fee_scalar: U256,
) -> U256 {
    let gas_used = U256::from(rollup_data_gas).saturating_add(l1_fee_overhead);
    l1_cost_bedrock_inner(gas_used, l1_base_fee, l1_fee_scalar)
}

fn l1_cost_bedrock_inner(gas_used: U256, l1_base_fee: U256, l1_fee_scalar: U256) -> U256 {
    gas_used
        .saturating_mul(l1_base_fee)
        .saturating_mul(l1_fee_scalar)
        .wrapping_div(U256::from(FEE_SCALAR_DECIMAL))
}
