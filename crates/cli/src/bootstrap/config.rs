use anyhow::Context;
use dnsprobe_domain::{CliOverrides, Config};

/// Explicit path first, then `./dnsprobe.toml`, then
/// `/etc/dnsprobe/config.toml`, then defaults. CLI overrides go last.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).context("failed to load configuration")
}
