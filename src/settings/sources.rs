use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use ktab::app_dirs;

use crate::cli::CliArgs;

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("ktab")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".ktab.toml"));
        files.push(current_dir.join("ktab.toml"));
    }

    files
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn default_files_include_current_directory_variants() {
        let files = default_config_files();
        assert!(files.iter().any(|path| path.ends_with(".ktab.toml")));
        assert!(files.iter().any(|path| path.ends_with("ktab.toml")));
    }

    #[test]
    fn explicit_files_are_merged() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("palette.toml");
        fs::write(&path, "[palette]\nmax_results = 12\n").expect("write config");

        let cli = CliArgs::parse_from([
            OsString::from("ktab"),
            OsString::from("--no-config"),
            OsString::from("--config"),
            path.clone().into_os_string(),
        ]);
        let config = build_config(&cli).expect("config");
        assert_eq!(config.get_int("palette.max_results").expect("key"), 12);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let cli = CliArgs::parse_from(["ktab", "--config", "/nonexistent/ktab.toml"]);
        assert!(build_config(&cli).is_err());
    }
}
