//! WiFi provisioning for the media server device.

pub mod networks;
pub mod setup;

pub use {
    networks::{NetworkOption, SignalStrength, network_label, network_options},
    setup::{ConnectOutcome, SelectedNetwork, SsidPrompt, WifiError, WifiSetup},
};
