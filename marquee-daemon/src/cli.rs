use std::path::PathBuf;

use clap::Parser;
use marquee_config::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "marquee")]
#[command(
    about = "Shows the poster of whatever you are watching on a framebuffer display"
)]
#[command(version)]
pub struct Args {
    /// Config file (JSON, or TOML when the extension is .toml)
    #[arg(short, long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Run a single poll cycle and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Validate the config file, print warnings and exit
    #[arg(long, default_value_t = false, conflicts_with = "once")]
    pub check_config: bool,
}
