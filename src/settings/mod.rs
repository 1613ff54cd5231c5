//! Configuration loading and resolution utilities.
//!
//! `load` layers the default config files, `--config` files, `KTAB__*`
//! environment variables and CLI flags, then validates the result into a
//! [`ResolvedConfig`].

mod raw;
mod resolved;
mod sources;

use anyhow::{Context, Result};

pub use resolved::{RemoteSettings, ResolvedConfig};

use crate::cli::CliArgs;
use raw::RawConfig;

/// Build the palette configuration for this invocation. Flags given on the
/// command line are applied last, over every file and environment layer.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw: RawConfig = sources::build_config(cli)?
		.try_deserialize()
		.context("configuration does not match the expected sections")?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}
