//! Bitcoin transaction fixtures for txgate tests.
//!
//! Everything here builds plain [`bitcoin`] values so it can be used from any crate in the
//! workspace without pulling in decoder or broker types.

use bitcoin::{
    absolute::LockTime,
    consensus::encode::serialize_hex,
    hashes::Hash,
    opcodes::{all::OP_RETURN, OP_0},
    transaction::Version,
    Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness,
};

/// Deterministic txid filled with `seed`.
pub fn test_txid(seed: u8) -> Txid {
    Txid::from_byte_array([seed; 32])
}

/// Outpoint on a deterministic txid.
pub fn test_outpoint(seed: u8, vout: u32) -> OutPoint {
    OutPoint {
        txid: test_txid(seed),
        vout,
    }
}

/// P2WPKH script paying to a deterministic key hash.
pub fn p2wpkh_script(seed: u8) -> ScriptBuf {
    let mut bytes = vec![OP_0.to_u8(), 20];
    bytes.extend_from_slice(&[seed; 20]);
    ScriptBuf::from_bytes(bytes)
}

/// Null-data script carrying `data` in a single direct push.
pub fn op_return_script(data: &[u8]) -> ScriptBuf {
    assert!(data.len() <= 75, "fixture only supports direct pushes");
    let mut bytes = Vec::with_capacity(data.len() + 2);
    bytes.push(OP_RETURN.to_u8());
    bytes.push(data.len() as u8);
    bytes.extend_from_slice(data);
    ScriptBuf::from_bytes(bytes)
}

/// Bare 1-of-1 multisig script. Valid, but has no address form.
pub fn bare_multisig_script() -> ScriptBuf {
    let mut bytes = vec![0x51, 0x21, 0x02];
    bytes.extend_from_slice(&[0x42; 32]);
    bytes.extend_from_slice(&[0x51, 0xae]);
    ScriptBuf::from_bytes(bytes)
}

/// Builds a version 2 transaction spending `inputs` into `outputs` (script, sats).
pub fn build_tx(inputs: &[OutPoint], outputs: &[(ScriptBuf, u64)]) -> Transaction {
    let input = inputs
        .iter()
        .map(|previous_output| TxIn {
            previous_output: *previous_output,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        })
        .collect();

    let output = outputs
        .iter()
        .map(|(script_pubkey, value)| TxOut {
            value: Amount::from_sat(*value),
            script_pubkey: script_pubkey.clone(),
        })
        .collect();

    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input,
        output,
    }
}

/// Attaches a signature-sized dummy witness to every input.
pub fn with_dummy_witness(mut tx: Transaction) -> Transaction {
    for txin in &mut tx.input {
        txin.witness = Witness::from_slice(&[vec![0x30; 71], vec![0x02; 33]]);
    }
    tx
}

/// Consensus hex encoding of `tx`.
pub fn tx_hex(tx: &Transaction) -> String {
    serialize_hex(tx)
}
