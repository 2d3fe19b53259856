//! Command-line arguments.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cubie-client")]
#[command(about = "Headless client for the cubie media server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Server URL, overriding the settings file and environment
    #[arg(short, long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Load the library, print the music tab and keep polling
    Run,

    /// List WiFi networks, or configure one
    Wifi {
        /// Network to join. Lists networks when omitted
        ssid: Option<String>,

        /// Passphrase for secured networks
        password: Option<String>,
    },
}
