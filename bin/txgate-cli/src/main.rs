//! Offline preview tool for signed transactions.
//!
//! Decodes raw transactions and funded bundles the way the approval screen shows them and
//! prints the result as JSON.

mod args;
mod cmd;

use std::process;

use args::{resolve_context_and_subcommand, CmdContext};
use cmd::exec_subc;
use txgate_common::logging::{self, FileLoggingConfig, LoggerConfig};

fn logger_config(ctx: &CmdContext) -> LoggerConfig {
    let settings = &ctx.config.logging;
    let mut config = LoggerConfig::new("txgate-cli".to_string())
        .with_json_logging(settings.json)
        .with_stderr(true);

    if let Some(directory) = &settings.directory {
        config = config.with_file_logging(
            FileLoggingConfig::new(directory.clone(), settings.file_name_prefix.clone())
                .with_json_format(settings.json),
        );
    }

    config
}

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        let (ctx, subc) = resolve_context_and_subcommand(args)?;
        logging::init(logger_config(&ctx))?;
        let output = exec_subc(subc, &ctx)?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
