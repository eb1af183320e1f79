use std::{fs, path::Path};

use anyhow::Context;
use serde_json::{json, Value};
use tracing::*;
use txgate_decoder::{
    decode, decode_deployment_bundle, decode_funded_interaction_bundle, decode_interaction,
    UnspentOutput,
};

use crate::args::{CmdContext, SubcBundle, SubcDecode, SubcDeployment, Subcommand};

pub(crate) fn exec_subc(cmd: Subcommand, ctx: &CmdContext) -> anyhow::Result<Value> {
    match cmd {
        Subcommand::Decode(subc) => exec_decode(subc, ctx),
        Subcommand::Bundle(subc) => exec_bundle(subc, ctx),
        Subcommand::Deployment(subc) => exec_deployment(subc, ctx),
    }
}

/// Reads a JSON array of UTXOs. No file means no known UTXOs.
fn load_utxos(path: Option<&Path>) -> anyhow::Result<Vec<UnspentOutput>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading utxo file {}", path.display()))?;
    let utxos: Vec<UnspentOutput> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing utxo file {}", path.display()))?;
    debug!(path = %path.display(), count = utxos.len(), "loaded utxos");
    Ok(utxos)
}

fn exec_decode(subc: SubcDecode, ctx: &CmdContext) -> anyhow::Result<Value> {
    let utxos = load_utxos(subc.utxos.as_deref())?;

    if subc.interaction {
        let (tx, gas_output) = decode_interaction(&subc.raw_hex, &utxos, ctx.network)
            .context("decoding interaction transaction")?;
        info!(txid = %tx.txid, miner_fee = tx.miner_fee, "decoded interaction");
        return Ok(json!({ "transaction": tx, "gas_output": gas_output }));
    }

    let tx = decode(&subc.raw_hex, &utxos, ctx.network).context("decoding transaction")?;
    info!(txid = %tx.txid, miner_fee = tx.miner_fee, "decoded transaction");
    Ok(serde_json::to_value(tx)?)
}

fn exec_bundle(subc: SubcBundle, ctx: &CmdContext) -> anyhow::Result<Value> {
    let funding_utxos = load_utxos(subc.funding_utxos.as_deref())?;
    let interaction_utxos = load_utxos(subc.interaction_utxos.as_deref())?;

    let bundle = decode_funded_interaction_bundle(
        subc.funding.as_deref(),
        &subc.interaction,
        &funding_utxos,
        &interaction_utxos,
        ctx.network,
    )
    .context("decoding funded interaction bundle")?;
    info!(
        txs = bundle.transactions.len(),
        total_mining_fee = bundle.total_mining_fee,
        opnet_gas_fee = bundle.opnet_gas_fee,
        "decoded bundle"
    );
    Ok(serde_json::to_value(bundle)?)
}

fn exec_deployment(subc: SubcDeployment, ctx: &CmdContext) -> anyhow::Result<Value> {
    let funding_utxos = load_utxos(subc.funding_utxos.as_deref())?;

    let bundle =
        decode_deployment_bundle(&subc.funding, &subc.deployment, &funding_utxos, ctx.network)
            .context("decoding deployment bundle")?;
    info!(
        total_mining_fee = bundle.total_mining_fee,
        opnet_gas_fee = bundle.opnet_gas_fee,
        "decoded deployment"
    );
    Ok(serde_json::to_value(bundle)?)
}
