//! L1 fee fields of OP Stack transaction receipts.
use crate::{l1_info::FeeScalar, L1FeeParams, L1InfoError, RollupCostData, RollupForks};
use alloy_primitives::U256;
use std::vec::Vec;

/// The L1 data fee related fields of a receipt, as returned by `eth_getTransactionReceipt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L1ReceiptFields {
    /// The base fee of the L1 origin block.
    pub l1_gas_price: U256,
    /// The L1 gas used by the transaction.
    pub l1_gas_used: U256,
    /// The L1 data fee charged.
    pub l1_fee: U256,
    /// Legacy fee scalar. Only set prior to Ecotone.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub l1_fee_scalar: Option<FeeScalar>,
    /// The blob base fee of the L1 origin block. Only set post-Ecotone.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub l1_blob_base_fee: Option<U256>,
    /// The base fee scalar. Only set post-Ecotone.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub l1_base_fee_scalar: Option<U256>,
    /// The blob base fee scalar. Only set post-Ecotone.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub l1_blob_base_fee_scalar: Option<U256>,
}

impl L1FeeParams {
    /// Returns the receipt fields of a transaction, or `None` if no L1 fee is charged.
    pub fn receipt_fields(&self, data: RollupCostData) -> Option<L1ReceiptFields> {
        let cost = self.l1_cost(data)?;
        let (l1_blob_base_fee, l1_base_fee_scalar, l1_blob_base_fee_scalar) = match self {
            Self::Bedrock(_) => (None, None, None),
            Self::Ecotone(params) => (
                Some(params.l1_blob_base_fee),
                Some(params.l1_base_fee_scalar),
                Some(params.l1_blob_base_fee_scalar),
            ),
        };

        Some(L1ReceiptFields {
            l1_gas_price: self.l1_base_fee(),
            l1_gas_used: cost.gas_used,
            l1_fee: cost.fee,
            l1_fee_scalar: self.fee_scalar(),
            l1_blob_base_fee,
            l1_base_fee_scalar,
            l1_blob_base_fee_scalar,
        })
    }
}

/// Derives the L1 receipt fields of the transactions of a block.
///
/// `l1_info_calldata` is the calldata of the L1 info deposit transaction, the first transaction
/// of the block. `txs` are the EIP-2718 encoded transactions; deposits get `None`.
pub fn derive_l1_receipt_fields<F, I, T>(
    forks: &F,
    block_time: u64,
    l1_info_calldata: &[u8],
    txs: I,
) -> Result<Vec<Option<L1ReceiptFields>>, L1InfoError>
where
    F: RollupForks,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let params = L1FeeParams::from_l1_info_calldata(forks, block_time, l1_info_calldata)?;

    Ok(txs
        .into_iter()
        .map(|tx| params.receipt_fields(RollupCostData::from_encoded_tx(tx.as_ref())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BedrockFeeParams, EcotoneFeeParams};
    use alloy_primitives::hex;

    const EMPTY_TX: [u8; 30] =
        hex!("dd80808094095e7baea6a6c7c4c2dfeb977efac326af552d878080808080");

    #[test]
    fn test_bedrock_receipt_fields() {
        let params = L1FeeParams::Bedrock(BedrockFeeParams::new(
            U256::from(1_000_000_000u64),
            U256::from(50),
            U256::from(7_000_000),
            false,
        ));
        let fields = params
            .receipt_fields(RollupCostData::from_calldata(&EMPTY_TX))
            .unwrap();

        assert_eq!(fields.l1_gas_price, U256::from(1_000_000_000u64));
        assert_eq!(fields.l1_gas_used, U256::from(1618));
        assert_eq!(fields.l1_fee, U256::from(11_326_000_000_000u64));
        assert_eq!(fields.l1_fee_scalar, Some(FeeScalar::from_raw(U256::from(7_000_000))));
        assert_eq!(fields.l1_blob_base_fee, None);

        // l1Fee = l1GasPrice * l1GasUsed * l1FeeScalar
        let scalar = fields.l1_fee_scalar.unwrap();
        assert_eq!(
            scalar.mul_floor(fields.l1_gas_price * fields.l1_gas_used),
            fields.l1_fee
        );
    }

    #[test]
    fn test_ecotone_receipt_fields() {
        let params = L1FeeParams::Ecotone(EcotoneFeeParams::new(
            U256::from(1_000_000_000u64),
            U256::from(10_000_000),
            U256::from(2),
            U256::from(3),
        ));
        let fields = params
            .receipt_fields(RollupCostData::from_calldata(&EMPTY_TX))
            .unwrap();

        assert_eq!(
            fields,
            L1ReceiptFields {
                l1_gas_price: U256::from(1_000_000_000u64),
                l1_gas_used: U256::from(480),
                l1_fee: U256::from(960_900),
                l1_fee_scalar: None,
                l1_blob_base_fee: Some(U256::from(10_000_000)),
                l1_base_fee_scalar: Some(U256::from(2)),
                l1_blob_base_fee_scalar: Some(U256::from(3)),
            }
        );
    }

    #[test]
    fn test_no_receipt_fields_without_cost_data() {
        let params = L1FeeParams::Bedrock(BedrockFeeParams::default());
        assert_eq!(params.receipt_fields(RollupCostData::default()), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_receipt_fields() {
        let fields = L1ReceiptFields {
            l1_gas_price: U256::from(1_000_000_000u64),
            l1_gas_used: U256::from(1618),
            l1_fee: U256::from(11_326_000_000_000u64),
            l1_fee_scalar: Some(FeeScalar::from_raw(U256::from(684_000))),
            l1_blob_base_fee: None,
            l1_base_fee_scalar: None,
            l1_blob_base_fee_scalar: None,
        };

        let json = serde_json::to_value(fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "l1GasPrice": "0x3b9aca00",
                "l1GasUsed": "0x652",
                "l1Fee": "0xa4d0a34ec00",
                "l1FeeScalar": "0.684",
            })
        );
        assert_eq!(
            serde_json::from_value::<L1ReceiptFields>(json).unwrap(),
            fields
        );
    }
}
