//! OP Stack (Optimism) L1 data availability fee: the fee charged to L2 transactions for posting
//! their data to L1.
//!
//! This crate provides:
//! - Rollup cost data of a transaction payload
//! - Bedrock/Regolith and Ecotone L1 cost functions, read from the `L1Block` contract storage
//! - A per-block cache of the cost function
//! - Extraction of the fee parameters from L1 info transaction calldata, and receipt fields
//!
//! Use this crate when executing or serving blocks of Optimism or compatible L2s.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod cache;
pub mod constants;
pub mod cost_data;
pub mod error;
pub mod l1_info;
pub mod l1block;
pub mod receipt;
pub mod spec;
pub mod state;

pub use cache::L1CostCache;
pub use cost_data::RollupCostData;
pub use error::L1InfoError;
pub use l1_info::{FeeScalar, ParseFeeScalarError};
pub use l1block::{bedrock_l1_cost, BedrockFeeParams, EcotoneFeeParams, L1Cost, L1FeeParams};
pub use receipt::{derive_l1_receipt_fields, L1ReceiptFields};
pub use spec::*;
pub use state::StateGetter;
