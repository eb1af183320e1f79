//! Decoded views of transactions, their inputs and outputs, and multi-transaction bundles.

use bitcoin::{OutPoint, ScriptBuf, Txid};
use serde::{Deserialize, Serialize};

/// An unspent output observed on chain, as supplied by the chain data provider.
///
/// Only used to learn the value (and optionally the script) of the outputs a raw
/// transaction spends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub txid: Txid,
    pub vout: u32,
    /// Value in satoshis.
    pub value: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_pubkey: Option<ScriptBuf>,
}

impl UnspentOutput {
    pub fn new(txid: Txid, vout: u32, value: u64) -> Self {
        Self {
            txid,
            vout,
            value,
            script_pubkey: None,
        }
    }

    pub fn with_script_pubkey(mut self, script_pubkey: ScriptBuf) -> Self {
        self.script_pubkey = Some(script_pubkey);
        self
    }

    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.txid,
            vout: self.vout,
        }
    }
}

/// A decoded transaction input with its value resolved from the UTXO set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTxInput {
    /// Txid of the output being spent.
    pub txid: Txid,
    /// Index of the output being spent.
    pub vout: u32,
    /// Value of the spent output, zero when it could not be resolved.
    pub value: u64,
    /// Whether the spent output was found in the supplied UTXO set.
    pub resolved: bool,
    /// Address of the spent output, when the UTXO carried a standard script.
    pub address: Option<String>,
}

/// A decoded transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTxOutput {
    /// `None` for OP_RETURN and any script without a standard address form.
    pub address: Option<String>,
    /// Value in satoshis.
    pub value: u64,
    pub script: ScriptBuf,
    /// Set iff the script starts with `OP_RETURN`.
    pub is_op_return: bool,
}

/// Canonical, fee-annotated view of a raw signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub txid: Txid,
    pub raw_hex: String,
    pub size_bytes: usize,
    /// Weight-based size with the witness discount applied.
    pub virtual_size_bytes: usize,
    pub inputs: Vec<ParsedTxInput>,
    pub outputs: Vec<ParsedTxOutput>,
    pub total_input_value: u64,
    pub total_output_value: u64,
    /// Always `total_input_value - total_output_value`. Negative when inputs could not be
    /// resolved.
    pub miner_fee: i64,
}

impl ParsedTransaction {
    /// Number of inputs whose spent output was missing from the UTXO set.
    pub fn unresolved_inputs(&self) -> usize {
        self.inputs.iter().filter(|input| !input.resolved).count()
    }

    /// The spendable outputs of this transaction, expressed as UTXOs.
    ///
    /// OP_RETURN outputs are skipped; output indices are preserved.
    pub fn produced_utxos(&self) -> Vec<UnspentOutput> {
        self.outputs
            .iter()
            .enumerate()
            .filter(|(_, output)| !output.is_op_return)
            .map(|(vout, output)| {
                UnspentOutput::new(self.txid, vout as u32, output.value)
                    .with_script_pubkey(output.script.clone())
            })
            .collect()
    }
}

/// One or more decoded transactions that are broadcast together, with aggregate fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBundle {
    /// Transactions in broadcast order (funding leg first when present).
    pub transactions: Vec<ParsedTransaction>,
    /// Sum of every leg's miner fee.
    pub total_mining_fee: i64,
    /// Value of the gas output, zero when there is none.
    pub opnet_gas_fee: u64,
    pub gas_output: Option<ParsedTxOutput>,
}

impl DecodedBundle {
    pub fn new(transactions: Vec<ParsedTransaction>, gas_output: Option<ParsedTxOutput>) -> Self {
        let total_mining_fee = transactions.iter().map(|tx| tx.miner_fee).sum();
        let opnet_gas_fee = gas_output.as_ref().map_or(0, |output| output.value);
        Self {
            transactions,
            total_mining_fee,
            opnet_gas_fee,
            gas_output,
        }
    }
}
