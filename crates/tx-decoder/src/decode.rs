//! Single-transaction decoding.

use std::collections::HashMap;

use bitcoin::{Address, Network, OutPoint, Script, Transaction, TxIn, TxOut};
use tracing::*;

use crate::{
    DecodeResult, ParsedTransaction, ParsedTxInput, ParsedTxOutput, RawTx, UnspentOutput,
};

/// Decodes `raw_hex` into a [`ParsedTransaction`], resolving input values against `utxos`.
///
/// Inputs missing from `utxos` contribute zero value; the resulting fee is understated but
/// the preview still renders. Only unparseable bytes fail.
pub fn decode(
    raw_hex: &str,
    utxos: &[UnspentOutput],
    network: Network,
) -> DecodeResult<ParsedTransaction> {
    let raw = RawTx::from_hex(raw_hex)?;
    let tx = Transaction::try_from(&raw)?;
    Ok(parse_transaction(&tx, raw.to_hex(), utxos, network))
}

/// Decodes an interaction transaction and extracts its gas output.
///
/// Output 0 of an interaction is, by protocol convention, the fee paid to the contract
/// layer. It is taken positionally; there is no gas output when the transaction has no
/// outputs.
pub fn decode_interaction(
    raw_hex: &str,
    utxos: &[UnspentOutput],
    network: Network,
) -> DecodeResult<(ParsedTransaction, Option<ParsedTxOutput>)> {
    let parsed = decode(raw_hex, utxos, network)?;
    let gas_output = parsed.outputs.first().cloned();
    Ok((parsed, gas_output))
}

fn parse_transaction(
    tx: &Transaction,
    raw_hex: String,
    utxos: &[UnspentOutput],
    network: Network,
) -> ParsedTransaction {
    let known: HashMap<OutPoint, &UnspentOutput> =
        utxos.iter().map(|utxo| (utxo.outpoint(), utxo)).collect();

    let inputs: Vec<_> = tx
        .input
        .iter()
        .map(|txin| parse_input(txin, &known, network))
        .collect();
    let outputs: Vec<_> = tx
        .output
        .iter()
        .map(|txout| parse_output(txout, network))
        .collect();

    let total_input_value = inputs
        .iter()
        .fold(0u64, |acc, input| acc.saturating_add(input.value));
    let total_output_value = outputs
        .iter()
        .fold(0u64, |acc, output| acc.saturating_add(output.value));
    let miner_fee = fee_between(total_input_value, total_output_value);

    let txid = tx.compute_txid();
    let unresolved = inputs.iter().filter(|input| !input.resolved).count();
    if unresolved > 0 {
        warn!(%txid, %unresolved, "inputs missing from utxo set, fee is understated");
    }
    debug!(%txid, vsize = tx.vsize(), %miner_fee, "decoded transaction");

    ParsedTransaction {
        txid,
        raw_hex,
        size_bytes: tx.total_size(),
        virtual_size_bytes: tx.vsize(),
        inputs,
        outputs,
        total_input_value,
        total_output_value,
        miner_fee,
    }
}

fn parse_input(
    txin: &TxIn,
    known: &HashMap<OutPoint, &UnspentOutput>,
    network: Network,
) -> ParsedTxInput {
    let prevout = txin.previous_output;
    let utxo = known.get(&prevout);

    ParsedTxInput {
        txid: prevout.txid,
        vout: prevout.vout,
        value: utxo.map_or(0, |utxo| utxo.value),
        resolved: utxo.is_some(),
        address: utxo
            .and_then(|utxo| utxo.script_pubkey.as_deref())
            .and_then(|script| script_address(script, network)),
    }
}

fn parse_output(txout: &TxOut, network: Network) -> ParsedTxOutput {
    let script = &txout.script_pubkey;
    let is_op_return = script.is_op_return();
    let address = if is_op_return {
        None
    } else {
        script_address(script, network)
    };

    ParsedTxOutput {
        address,
        value: txout.value.to_sat(),
        script: script.clone(),
        is_op_return,
    }
}

/// Standard address for `script`, if it has one.
fn script_address(script: &Script, network: Network) -> Option<String> {
    Address::from_script(script, network)
        .ok()
        .map(|address| address.to_string())
}

fn fee_between(total_input_value: u64, total_output_value: u64) -> i64 {
    let fee = i128::from(total_input_value) - i128::from(total_output_value);
    fee.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
