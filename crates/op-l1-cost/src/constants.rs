//! Well-known addresses, storage slots and byte layouts of the `L1Block` predeploy.
use alloy_primitives::{address, Address, U256};

/// Calldata gas charged per zero byte.
pub const ZERO_BYTE_COST: u64 = 4;
/// Calldata gas charged per non-zero byte (EIP-2028).
pub const NON_ZERO_BYTE_COST: u64 = 16;

/// Prior to Regolith an extra 68 non-zero bytes were charged to account for the signature of a
/// legacy transaction.
pub const BEDROCK_SIGNATURE_PADDING: u64 = 68;

/// Fixed point decimal scaling of the Bedrock fee scalar and the Ecotone scalars.
pub const FEE_SCALAR_DECIMAL: u64 = 1_000_000;

/// Divisor of the Ecotone cost function, `16e6`.
pub const ECOTONE_DIVISOR: u64 = FEE_SCALAR_DECIMAL * NON_ZERO_BYTE_COST;

/// The two 4-byte Ecotone fee scalar values are packed into the same storage slot as the 8-byte sequence number.
/// Byte offset within the storage slot of the 4-byte baseFeeScalar attribute.
pub const BASE_FEE_SCALAR_OFFSET: usize = 16;
/// The two 4-byte Ecotone fee scalar values are packed into the same storage slot as the 8-byte sequence number.
/// Byte offset within the storage slot of the 4-byte blobBaseFeeScalar attribute.
pub const BLOB_BASE_FEE_SCALAR_OFFSET: usize = 20;

// The first Ecotone block is detected by comparing both scalars as one 8-byte section starting at
// BASE_FEE_SCALAR_OFFSET, which only holds while the two values are adjacent.
const _: () = assert!(
    BLOB_BASE_FEE_SCALAR_OFFSET == BASE_FEE_SCALAR_OFFSET + 4,
    "L1 fee scalars must be adjacent in the scalars slot"
);

pub const L1_BASE_FEE_SLOT: U256 = U256::from_limbs([1u64, 0, 0, 0]);
pub const L1_OVERHEAD_SLOT: U256 = U256::from_limbs([5u64, 0, 0, 0]);
pub const L1_SCALAR_SLOT: U256 = U256::from_limbs([6u64, 0, 0, 0]);

/// [ECOTONE_L1_BLOB_BASE_FEE_SLOT] was added in the Ecotone upgrade and stores the L1 blobBaseFee attribute.
pub const ECOTONE_L1_BLOB_BASE_FEE_SLOT: U256 = U256::from_limbs([7u64, 0, 0, 0]);

/// As of the ecotone upgrade, this storage slot stores the 32-bit basefeeScalar and blobBaseFeeScalar attributes at
/// offsets [BASE_FEE_SCALAR_OFFSET] and [BLOB_BASE_FEE_SCALAR_OFFSET] respectively.
pub const ECOTONE_L1_FEE_SCALARS_SLOT: U256 = U256::from_limbs([3u64, 0, 0, 0]);

/// An empty 64-bit set of scalar values.
pub const EMPTY_SCALARS: [u8; 8] = [0u8; 8];

/// The address of the L1Block contract.
pub const L1_BLOCK_CONTRACT: Address = address!("0x4200000000000000000000000000000000000015");

/// The 4 byte selector of
/// `setL1BlockValues(uint64,uint64,uint256,bytes32,uint64,bytes32,uint256,uint256)`.
pub const BEDROCK_L1_INFO_SELECTOR: [u8; 4] = [0x01, 0x5d, 0x8e, 0xb9];

/// The 4 byte selector of `setL1BlockValuesEcotone()`.
pub const ECOTONE_L1_INFO_SELECTOR: [u8; 4] = [0x44, 0x0a, 0x5e, 0x20];

/// Minimum length of Bedrock L1 info calldata: selector followed by 8 ABI words.
pub const BEDROCK_L1_INFO_LEN: usize = 4 + 32 * 8;

/// Exact length of Ecotone L1 info calldata.
pub const ECOTONE_L1_INFO_LEN: usize = 164;

/// EIP-2718 type byte of deposit transactions.
pub const DEPOSIT_TRANSACTION_TYPE: u8 = 0x7E;
