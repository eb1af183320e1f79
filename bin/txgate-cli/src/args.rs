//! Command line arguments for the `txgate-cli` binary.

use std::path::PathBuf;

use argh::FromArgs;
use bitcoin::Network;
use txgate_config::{load_config, Config};

/// Decodes signed transactions into the preview shown before approval.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(option, description = "path to a TOML config file", short = 'c')]
    pub(crate) config: Option<PathBuf>,

    #[argh(
        option,
        description = "network name [bitcoin, testnet, signet, regtest], overrides the config",
        short = 'b'
    )]
    pub(crate) bitcoin_network: Option<String>,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Decode(SubcDecode),
    Bundle(SubcBundle),
    Deployment(SubcDeployment),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "decode",
    description = "decodes a single raw transaction"
)]
pub(crate) struct SubcDecode {
    #[argh(positional, description = "raw transaction hex")]
    pub(crate) raw_hex: String,

    #[argh(
        option,
        description = "JSON file with the UTXOs the transaction spends",
        short = 'u'
    )]
    pub(crate) utxos: Option<PathBuf>,

    #[argh(
        switch,
        description = "treat the transaction as an interaction and report its gas output",
        short = 'i'
    )]
    pub(crate) interaction: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "bundle",
    description = "decodes a funding transaction chained into an interaction"
)]
pub(crate) struct SubcBundle {
    #[argh(option, description = "raw funding transaction hex")]
    pub(crate) funding: Option<String>,

    #[argh(option, description = "raw interaction transaction hex")]
    pub(crate) interaction: String,

    #[argh(option, description = "JSON file with the UTXOs the funding transaction spends")]
    pub(crate) funding_utxos: Option<PathBuf>,

    #[argh(
        option,
        description = "JSON file with the UTXOs the interaction spends (the funding outputs)"
    )]
    pub(crate) interaction_utxos: Option<PathBuf>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "deployment",
    description = "decodes a contract deployment and its funding transaction"
)]
pub(crate) struct SubcDeployment {
    #[argh(option, description = "raw funding transaction hex")]
    pub(crate) funding: String,

    #[argh(option, description = "raw deployment transaction hex")]
    pub(crate) deployment: String,

    #[argh(option, description = "JSON file with the UTXOs the funding transaction spends")]
    pub(crate) funding_utxos: Option<PathBuf>,
}

/// Resolved settings shared by every subcommand.
#[derive(Debug)]
pub(crate) struct CmdContext {
    pub(crate) config: Config,

    /// Network used to render addresses.
    pub(crate) network: Network,
}

/// Resolves the command context and subcommand from the parsed command line arguments.
pub(crate) fn resolve_context_and_subcommand(
    args: Args,
) -> anyhow::Result<(CmdContext, Subcommand)> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    let network = resolve_network(args.bitcoin_network.as_deref(), &config)?;

    Ok((CmdContext { config, network }, args.subc))
}

fn resolve_network(arg: Option<&str>, config: &Config) -> anyhow::Result<Network> {
    match arg {
        Some(name) => name
            .parse()
            .map_err(|_| anyhow::anyhow!("unsupported network option: {name}")),
        None => Ok(config.network),
    }
}
