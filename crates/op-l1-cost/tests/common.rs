#![allow(dead_code)]

use alloy_primitives::{hex, Address, B256, U256};
use alloy_sol_types::sol;
use op_l1_cost::constants::{
    BASE_FEE_SCALAR_OFFSET, BLOB_BASE_FEE_SCALAR_OFFSET, ECOTONE_L1_BLOB_BASE_FEE_SLOT,
    ECOTONE_L1_FEE_SCALARS_SLOT, ECOTONE_L1_INFO_SELECTOR, L1_BASE_FEE_SLOT, L1_BLOCK_CONTRACT,
    L1_OVERHEAD_SLOT, L1_SCALAR_SLOT,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::BTreeMap, fmt::Debug};

// Constant for testdata directory path
pub(crate) const TESTS_TESTDATA: &str = "tests/testdata";

/// Legacy transaction `nonce=0, to=0x095e..2d87, value=0, gas=0, gasPrice=0, data=[]`, unsigned.
///
/// 30 non-zero bytes: 480 calldata gas, 1568 with the pre-Regolith signature padding.
pub(crate) const EMPTY_TX: [u8; 30] =
    hex!("dd80808094095e7baea6a6c7c4c2dfeb977efac326af552d878080808080");

/// In-memory storage, keyed by account and slot.
pub(crate) type MemoryState = BTreeMap<(Address, U256), U256>;

sol! {
    /// Updates the L1 block values, prior to Ecotone.
    function setL1BlockValues(
        uint64 number,
        uint64 timestamp,
        uint256 basefee,
        bytes32 hash,
        uint64 sequence,
        bytes32 batcher,
        uint256 overhead,
        uint256 scalar
    );
}

/// Bedrock L1 info with the given fee values.
pub(crate) fn bedrock_l1_info(basefee: u64, overhead: u64, scalar: u64) -> setL1BlockValuesCall {
    setL1BlockValuesCall {
        number: 1234,
        timestamp: 1234,
        basefee: U256::from(basefee),
        hash: B256::left_padding_from(&[0x04, 0xd2]),
        sequence: 1234,
        batcher: B256::left_padding_from(&[0x04, 0xd2]),
        overhead: U256::from(overhead),
        scalar: U256::from(scalar),
    }
}

/// Values set by `setL1BlockValuesEcotone`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct EcotoneL1Info {
    pub(crate) base_fee_scalar: u32,
    pub(crate) blob_base_fee_scalar: u32,
    pub(crate) sequence_number: u64,
    pub(crate) timestamp: u64,
    pub(crate) number: u64,
    pub(crate) base_fee: U256,
    pub(crate) blob_base_fee: U256,
    pub(crate) hash: B256,
    pub(crate) batcher_hash: B256,
}

impl EcotoneL1Info {
    /// Tightly packed calldata of `setL1BlockValuesEcotone()`.
    pub(crate) fn calldata(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(164);
        buf.extend_from_slice(&ECOTONE_L1_INFO_SELECTOR);
        buf.extend_from_slice(&self.base_fee_scalar.to_be_bytes());
        buf.extend_from_slice(&self.blob_base_fee_scalar.to_be_bytes());
        buf.extend_from_slice(&self.sequence_number.to_be_bytes());
        buf.extend_from_slice(&self.timestamp.to_be_bytes());
        buf.extend_from_slice(&self.number.to_be_bytes());
        buf.extend_from_slice(&self.base_fee.to_be_bytes::<32>());
        buf.extend_from_slice(&self.blob_base_fee.to_be_bytes::<32>());
        buf.extend_from_slice(self.hash.as_slice());
        buf.extend_from_slice(self.batcher_hash.as_slice());
        buf
    }
}

/// Applies the storage writes of `setL1BlockValues` to the `L1Block` contract.
pub(crate) fn apply_bedrock_l1_info(state: &mut MemoryState, info: &setL1BlockValuesCall) {
    state.insert((L1_BLOCK_CONTRACT, L1_BASE_FEE_SLOT), info.basefee);
    state.insert(
        (L1_BLOCK_CONTRACT, ECOTONE_L1_FEE_SCALARS_SLOT),
        U256::from(info.sequence),
    );
    state.insert((L1_BLOCK_CONTRACT, L1_OVERHEAD_SLOT), info.overhead);
    state.insert((L1_BLOCK_CONTRACT, L1_SCALAR_SLOT), info.scalar);
}

/// Applies the storage writes of `setL1BlockValuesEcotone` to the `L1Block` contract.
///
/// The sequence number shares its slot with the two scalars.
pub(crate) fn apply_ecotone_l1_info(state: &mut MemoryState, info: &EcotoneL1Info) {
    let mut packed = [0u8; 32];
    packed[BASE_FEE_SCALAR_OFFSET..BASE_FEE_SCALAR_OFFSET + 4]
        .copy_from_slice(&info.base_fee_scalar.to_be_bytes());
    packed[BLOB_BASE_FEE_SCALAR_OFFSET..BLOB_BASE_FEE_SCALAR_OFFSET + 4]
        .copy_from_slice(&info.blob_base_fee_scalar.to_be_bytes());
    packed[24..].copy_from_slice(&info.sequence_number.to_be_bytes());

    state.insert((L1_BLOCK_CONTRACT, L1_BASE_FEE_SLOT), info.base_fee);
    state.insert(
        (L1_BLOCK_CONTRACT, ECOTONE_L1_FEE_SCALARS_SLOT),
        U256::from_be_bytes(packed),
    );
    state.insert(
        (L1_BLOCK_CONTRACT, ECOTONE_L1_BLOB_BASE_FEE_SLOT),
        info.blob_base_fee,
    );
}

/// Compares or saves the output to a testdata file.
///
/// If the testdata file does not exist yet the output is saved, otherwise the deserialized
/// testdata must match the output.
///
/// # Arguments
///
/// * `filename` - The name of the testdata file, relative to tests/testdata/
/// * `output` - The output to compare or save
pub(crate) fn compare_or_save_testdata<T>(filename: &str, output: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    use std::{fs, path::PathBuf};

    let tests_dir = PathBuf::from(TESTS_TESTDATA);
    let testdata_file = tests_dir.join(filename);

    // Create directory if it doesn't exist
    if !tests_dir.exists() {
        fs::create_dir_all(&tests_dir).unwrap();
    }

    let output_json = serde_json::to_string_pretty(output).unwrap();

    // If the testdata file doesn't exist, save the output
    if !testdata_file.exists() {
        fs::write(&testdata_file, &output_json).unwrap();
        println!("Saved testdata to {}", testdata_file.display());
        return;
    }

    let expected_json = fs::read_to_string(&testdata_file).unwrap();
    let expected: T = serde_json::from_str(&expected_json).unwrap();

    if output != &expected {
        let expected_pretty = serde_json::to_string_pretty(&expected).unwrap();
        panic!(
            "Value does not match testdata.\nExpected:\n{}\n\nActual:\n{}",
            expected_pretty, output_json
        );
    }
}
