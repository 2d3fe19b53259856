//! WiFi provisioning flow: scan, pick a network, send credentials.
//!
//! Scanning and joining happen on the server. This side only validates the
//! selection and relays the outcome, including the hotspot case where the
//! device must reboot before it can join.

use {
    thiserror::Error,
    tracing::{info, warn},
};

use crate::{
    api::{Backend, Network, WifiCredentials},
    error::ApiError,
    wifi::networks::{NetworkOption, network_options, requires_password, security_label},
};

/// Errors surfaced by the WiFi setup flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    /// The network scan failed.
    #[error("Failed to load WiFi networks: {0}")]
    Load(ApiError),
    /// `connect` was called without a selection.
    #[error("Please select a WiFi network")]
    NoSelection,
    /// A secured network was given an empty password.
    #[error("This network requires a password")]
    PasswordRequired,
    /// The server did not apply the configuration.
    #[error("Failed to configure WiFi: {0}")]
    Configure(String),
    /// The reboot request failed.
    #[error("Please reboot manually: sudo reboot ({0})")]
    Reboot(ApiError),
    /// The restart request failed.
    #[error("Failed to restart server: {0}")]
    Restart(ApiError),
}

/// Asks the user for the real name of a hidden network.
pub trait SsidPrompt {
    /// The SSID entered, or `None` if the user dismissed the prompt.
    fn ask_ssid(&mut self) -> Option<String>;
}

impl<F> SsidPrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn ask_ssid(&mut self) -> Option<String> {
        self()
    }
}

/// The network chosen in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedNetwork {
    /// SSID to join, the prompted one for hidden networks.
    pub ssid: String,
    /// Security label shown next to the name.
    pub security: String,
    /// Whether a password must be supplied.
    pub requires_password: bool,
}

/// Successful result of [`WifiSetup::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The configuration was applied.
    Connected,
    /// The device is in hotspot mode and must reboot to join.
    RebootRequired,
}

/// WiFi setup state.
pub struct WifiSetup<B: Backend> {
    backend: B,
    networks: Vec<Network>,
    selected: Option<SelectedNetwork>,
}

impl<B: Backend> WifiSetup<B> {
    /// Creates an empty setup flow.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            networks: Vec::new(),
            selected: None,
        }
    }

    /// Scans for networks through the server.
    ///
    /// # Errors
    ///
    /// Returns `WifiError::Load` if the scan request failed. The previous
    /// list is kept.
    pub async fn load_networks(&mut self) -> Result<&[Network], WifiError> {
        let response = self.backend.wifi_networks().await.map_err(|e| {
            warn!(error = %e, "Error loading networks");
            WifiError::Load(e)
        })?;

        info!(count = response.networks.len(), "WiFi networks loaded");
        self.networks = response.networks;
        Ok(&self.networks)
    }

    /// Networks from the last successful scan.
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    /// Picker entries for the last scan.
    pub fn network_options(&self) -> Vec<NetworkOption> {
        network_options(&self.networks)
    }

    /// Selects the network whose picker value is `ssid`.
    ///
    /// Hidden networks ask `prompt` for the real SSID. An empty value, an
    /// unknown SSID or a dismissed prompt clears the selection.
    ///
    /// # Returns
    ///
    /// The selection, if one was made.
    pub fn select_network(
        &mut self,
        ssid: &str,
        prompt: &mut dyn SsidPrompt,
    ) -> Option<&SelectedNetwork> {
        self.selected = None;
        if ssid.is_empty() {
            return None;
        }

        let network = self.networks.iter().find(|network| network.ssid == ssid)?;
        let ssid = if network.hidden {
            prompt.ask_ssid().filter(|answer| !answer.is_empty())?
        } else {
            network.ssid.clone()
        };

        self.selected = Some(SelectedNetwork {
            ssid,
            security: security_label(network).to_string(),
            requires_password: requires_password(network),
        });
        self.selected.as_ref()
    }

    /// Current selection.
    pub fn selected(&self) -> Option<&SelectedNetwork> {
        self.selected.as_ref()
    }

    /// Sends the credentials for the selected network.
    ///
    /// # Arguments
    ///
    /// * `password` - Passphrase, may be empty for open networks.
    ///
    /// # Returns
    ///
    /// Whether the device joined or needs a reboot first.
    ///
    /// # Errors
    ///
    /// Returns `WifiError::NoSelection` or `WifiError::PasswordRequired`
    /// before sending anything, and `WifiError::Configure` when the server
    /// rejects the configuration.
    pub async fn connect(&self, password: &str) -> Result<ConnectOutcome, WifiError> {
        let selected = self.selected.as_ref().ok_or(WifiError::NoSelection)?;
        if selected.requires_password && password.is_empty() {
            return Err(WifiError::PasswordRequired);
        }

        let credentials = WifiCredentials {
            ssid: selected.ssid.clone(),
            password: password.to_string(),
        };

        let response = match self.backend.configure_wifi(&credentials).await {
            Ok(response) => response,
            Err(ApiError::Rejected { message }) => return Err(WifiError::Configure(message)),
            Err(e) => {
                warn!(ssid = %selected.ssid, error = %e, "Error configuring WiFi");
                return Err(WifiError::Configure(e.to_string()));
            }
        };

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "Failed to configure WiFi".to_string());
            warn!(ssid = %selected.ssid, %message, "WiFi configuration rejected");
            return Err(WifiError::Configure(message));
        }

        if response.reboot_required {
            info!(ssid = %selected.ssid, "Hotspot mode, reboot required to join");
            return Ok(ConnectOutcome::RebootRequired);
        }

        info!(ssid = %selected.ssid, "WiFi configuration applied");
        Ok(ConnectOutcome::Connected)
    }

    /// Asks the server to reboot the device.
    ///
    /// # Errors
    ///
    /// Returns `WifiError::Reboot` if the request failed.
    pub async fn reboot(&self) -> Result<(), WifiError> {
        self.backend.reboot().await.map_err(WifiError::Reboot)
    }

    /// Asks the server to restart itself on the new network.
    ///
    /// # Errors
    ///
    /// Returns `WifiError::Restart` on a transport error or non-2xx status.
    pub async fn restart(&self) -> Result<(), WifiError> {
        self.backend.restart().await.map_err(WifiError::Restart)
    }
}
