//! Multi-transaction decoding for the broadcast bundles shown in previews.

use bitcoin::Network;

use crate::{decode, decode_interaction, DecodeResult, DecodedBundle, UnspentOutput};

/// Decodes a funding transaction chained into an interaction transaction.
///
/// The funding leg is decoded against the UTXOs it consumes (`funding_input_utxos`); the
/// interaction leg against the UTXOs the funding leg produced (`funding_output_utxos`).
/// Mixing the two sets up leaves the interaction inputs unresolved and understates the fee,
/// so they are kept as separate arguments. Without a funding leg, `funding_output_utxos` are
/// simply the outputs the interaction spends.
pub fn decode_funded_interaction_bundle(
    funding_hex: Option<&str>,
    interaction_hex: &str,
    funding_input_utxos: &[UnspentOutput],
    funding_output_utxos: &[UnspentOutput],
    network: Network,
) -> DecodeResult<DecodedBundle> {
    let mut transactions = Vec::with_capacity(2);
    if let Some(funding_hex) = funding_hex {
        transactions.push(decode(funding_hex, funding_input_utxos, network)?);
    }

    let (interaction, gas_output) =
        decode_interaction(interaction_hex, funding_output_utxos, network)?;
    transactions.push(interaction);

    Ok(DecodedBundle::new(transactions, gas_output))
}

/// Decodes a contract deployment: a funding transaction followed by the deployment itself.
///
/// The deployment leg is an interaction-class transaction and is resolved against the
/// outputs of the decoded funding leg.
pub fn decode_deployment_bundle(
    funding_hex: &str,
    deployment_hex: &str,
    funding_utxos: &[UnspentOutput],
    network: Network,
) -> DecodeResult<DecodedBundle> {
    let funding = decode(funding_hex, funding_utxos, network)?;
    let (deployment, gas_output) =
        decode_interaction(deployment_hex, &funding.produced_utxos(), network)?;

    Ok(DecodedBundle::new(vec![funding, deployment], gas_output))
}

/// Decodes a plain transfer. There is no gas output, so the gas fee is zero.
pub fn decode_simple_transfer(
    raw_hex: &str,
    utxos: &[UnspentOutput],
    network: Network,
) -> DecodeResult<DecodedBundle> {
    let parsed = decode(raw_hex, utxos, network)?;
    Ok(DecodedBundle::new(vec![parsed], None))
}
