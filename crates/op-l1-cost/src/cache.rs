//! Per-block L1 cost function.
use crate::{L1Cost, L1FeeParams, RollupCostData, RollupForks, StateGetter};
use alloy_primitives::U256;
use tracing::debug;

/// Computes the L1 data fee of the transactions of a block.
///
/// The `L1Block` oracle values are read lazily, on the first charged transaction of a block, so
/// that the deposit transactions of the block are applied first. The snapshot is then reused for
/// the remaining transactions of the block, even if the oracle storage changes in between.
///
/// A cache is owned by a single block processing context. Using it across blocks is supported: a
/// new block time discards the snapshot and reloads the values, which is logged at debug level.
#[derive(Clone, Debug)]
pub struct L1CostCache<F> {
    forks: F,
    cached: Option<(u64, L1FeeParams)>,
}

impl<F: RollupForks> L1CostCache<F> {
    /// Creates an empty cache.
    pub const fn new(forks: F) -> Self {
        Self {
            forks,
            cached: None,
        }
    }

    /// Returns the fork schedule.
    pub const fn forks(&self) -> &F {
        &self.forks
    }

    /// Returns the cached snapshot, if any.
    pub const fn cached(&self) -> Option<&(u64, L1FeeParams)> {
        self.cached.as_ref()
    }

    /// Calculates the L1 cost of a transaction. Returns `Ok(None)` if no L1 fee is charged.
    pub fn l1_cost<S: StateGetter>(
        &mut self,
        state: &mut S,
        data: RollupCostData,
        block_time: u64,
    ) -> Result<Option<L1Cost>, S::Error> {
        // Do not charge if there is no rollup cost data (e.g. RPC call or deposit).
        if data.is_empty() {
            return Ok(None);
        }

        Ok(self.params_for_block(state, block_time)?.l1_cost(data))
    }

    /// Calculates the L1 fee of a transaction. Returns `Ok(None)` if no L1 fee is charged.
    pub fn l1_fee<S: StateGetter>(
        &mut self,
        state: &mut S,
        data: RollupCostData,
        block_time: u64,
    ) -> Result<Option<U256>, S::Error> {
        Ok(self.l1_cost(state, data, block_time)?.map(|cost| cost.fee))
    }

    /// Returns the cost function of the block, reading it from the state on a new block time.
    pub fn params_for_block<S: StateGetter>(
        &mut self,
        state: &mut S,
        block_time: u64,
    ) -> Result<L1FeeParams, S::Error> {
        match self.cached {
            Some((cached_time, params)) if cached_time == block_time => return Ok(params),
            Some((cached_time, _)) => {
                debug!(
                    target: "l1_cost",
                    old_time = cached_time,
                    new_time = block_time,
                    "l1 cost function re-used for a different block"
                );
            }
            None => {}
        }

        let params = L1FeeParams::try_fetch(state, &self.forks, block_time)?;
        debug!(
            target: "l1_cost",
            block_time,
            spec = %self.forks.spec_at(block_time),
            ecotone = params.is_ecotone(),
            "loaded l1 fee params"
        );
        self.cached = Some((block_time, params));
        Ok(params)
    }

    /// Discards the cached snapshot.
    pub fn clear(&mut self) {
        self.cached = None;
    }
}
