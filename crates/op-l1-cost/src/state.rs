//! Storage access needed to read the L1 fee parameters.
use alloy_primitives::{Address, U256};
use auto_impl::auto_impl;
use core::convert::Infallible;
use std::collections::BTreeMap;

/// Reads contract storage at the current block.
///
/// Implemented by the state layer. Reads are expected to observe every write made earlier in the
/// block, including those of deposit transactions that update the `L1Block` contract.
#[auto_impl(&mut, Box)]
pub trait StateGetter {
    /// The state error type.
    type Error;

    /// Gets storage value of address at index.
    fn storage(&mut self, address: Address, index: U256) -> Result<U256, Self::Error>;
}

impl StateGetter for BTreeMap<(Address, U256), U256> {
    type Error = Infallible;

    fn storage(&mut self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self.get(&(address, index)).copied().unwrap_or_default())
    }
}

#[cfg(feature = "std")]
impl StateGetter for std::collections::HashMap<(Address, U256), U256> {
    type Error = Infallible;

    fn storage(&mut self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self.get(&(address, index)).copied().unwrap_or_default())
    }
}
