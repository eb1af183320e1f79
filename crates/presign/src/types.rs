//! Pre-signed bundles and the raw payloads broadcast once they are approved.

use serde::{Deserialize, Serialize};
use txgate_decoder::{DecodedBundle, ParsedTransaction, ParsedTxOutput, UnspentOutput};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Data that records when it was stored, so a slot can expire it.
pub trait Timestamped {
    /// Milliseconds since the epoch at which the data was stored.
    fn created_at(&self) -> u64;

    fn set_created_at(&mut self, now_millis: u64);
}

/// The kind of operation a pre-signed bundle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreSignedKind {
    Interaction,
    Deployment,
    BitcoinTransfer,
    TokenTransfer,
    Mint,
    Airdrop,
    NftTransfer,
}

/// Funding and deployment transactions of a contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct DeploymentTxPair {
    pub funding_tx_hex: String,
    pub deployment_tx_hex: String,
}

/// Exactly what gets broadcast once the user approves.
///
/// The hex strings are signed material and are wiped when the payload is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RawBroadcastPayload {
    pub funding_tx_hex: Option<String>,
    pub interaction_tx_hex: Option<String>,
    pub deployment_tx_pair: Option<DeploymentTxPair>,
    pub bitcoin_tx_hex: Option<String>,
    /// Wallet UTXOs left over after broadcast.
    #[zeroize(skip)]
    pub next_utxos: Vec<UnspentOutput>,
}

/// A decoded, signed-but-unbroadcast bundle of any [`PreSignedKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreSignedTransactionData {
    #[serde(rename = "type")]
    pub kind: PreSignedKind,
    pub created_at: u64,
    pub transactions: Vec<ParsedTransaction>,
    pub total_mining_fee: i64,
    pub opnet_gas_fee: u64,
    pub gas_output: Option<ParsedTxOutput>,
    pub raw_broadcast_payload: RawBroadcastPayload,
}

impl PreSignedTransactionData {
    /// Wraps a decoded bundle. `created_at` is stamped when the data is stored.
    pub fn from_bundle(
        kind: PreSignedKind,
        bundle: DecodedBundle,
        raw_broadcast_payload: RawBroadcastPayload,
    ) -> Self {
        let DecodedBundle {
            transactions,
            total_mining_fee,
            opnet_gas_fee,
            gas_output,
        } = bundle;

        Self {
            kind,
            created_at: 0,
            transactions,
            total_mining_fee,
            opnet_gas_fee,
            gas_output,
            raw_broadcast_payload,
        }
    }
}

impl Timestamped for PreSignedTransactionData {
    fn created_at(&self) -> u64 {
        self.created_at
    }

    fn set_created_at(&mut self, now_millis: u64) {
        self.created_at = now_millis;
    }
}

impl Drop for PreSignedTransactionData {
    fn drop(&mut self) {
        for tx in &mut self.transactions {
            tx.raw_hex.zeroize();
        }
    }
}

/// Preview of a funded contract interaction, the narrow shape used by the interaction
/// signing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreSignedInteractionData {
    pub created_at: u64,
    pub funding_tx: Option<ParsedTransaction>,
    pub interaction_tx: ParsedTransaction,
    pub gas_output: Option<ParsedTxOutput>,
    pub total_mining_fee: i64,
    pub opnet_gas_fee: u64,
    pub raw_broadcast_payload: RawBroadcastPayload,
}

impl PreSignedInteractionData {
    /// Splits a funded interaction bundle into its legs.
    ///
    /// Returns `None` when the bundle holds no transactions.
    pub fn from_bundle(
        bundle: DecodedBundle,
        raw_broadcast_payload: RawBroadcastPayload,
    ) -> Option<Self> {
        let DecodedBundle {
            mut transactions,
            total_mining_fee,
            opnet_gas_fee,
            gas_output,
        } = bundle;

        let interaction_tx = transactions.pop()?;
        let funding_tx = transactions.pop();

        Some(Self {
            created_at: 0,
            funding_tx,
            interaction_tx,
            gas_output,
            total_mining_fee,
            opnet_gas_fee,
            raw_broadcast_payload,
        })
    }
}

impl Timestamped for PreSignedInteractionData {
    fn created_at(&self) -> u64 {
        self.created_at
    }

    fn set_created_at(&mut self, now_millis: u64) {
        self.created_at = now_millis;
    }
}

impl Drop for PreSignedInteractionData {
    fn drop(&mut self) {
        if let Some(funding_tx) = &mut self.funding_tx {
            funding_tx.raw_hex.zeroize();
        }
        self.interaction_tx.raw_hex.zeroize();
    }
}
