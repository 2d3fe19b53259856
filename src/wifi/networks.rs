//! Presentation of scanned WiFi networks.

use crate::api::Network;

/// Label shown for networks that do not broadcast their SSID.
pub const HIDDEN_NETWORK: &str = "[Hidden Network]";

/// Only option when the scan came back empty.
pub const NO_NETWORKS: &str = "No networks found";

/// Placeholder option heading a non-empty list.
pub const SELECT_NETWORK: &str = "Select a network...";

/// Signal bucket derived from the link quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStrength {
    /// Quality of 70 or more.
    Strong,
    /// Quality of 40 or more.
    Fair,
    /// Anything lower, or a quality that does not parse.
    Weak,
}

impl SignalStrength {
    /// Bar icons for the option label.
    #[must_use]
    pub fn bars(self) -> &'static str {
        match self {
            SignalStrength::Strong => "📶📶📶",
            SignalStrength::Fair => "📶📶",
            SignalStrength::Weak => "📶",
        }
    }
}

/// Bucket for the leading quality number of a `"quality/max"` signal.
///
/// `None` when the scan reported no signal at all.
#[must_use]
pub fn signal_strength(network: &Network) -> Option<SignalStrength> {
    let signal = network.signal.as_deref()?;
    let quality = signal.split('/').next().unwrap_or_default();

    Some(match leading_integer(quality) {
        Some(level) if level >= 70 => SignalStrength::Strong,
        Some(level) if level >= 40 => SignalStrength::Fair,
        _ => SignalStrength::Weak,
    })
}

/// Integer at the start of `text`, ignoring leading whitespace and any
/// trailing unit such as `dBm`.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(['-', '+']));
    let digits_end = text[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |offset| digits_start + offset);
    text[..digits_end].parse().ok()
}

/// Security label: the reported one, else `WPA/WPA2` when encrypted, else
/// `Open`.
#[must_use]
pub fn security_label(network: &Network) -> &str {
    match network.security.as_deref() {
        Some(security) if !security.is_empty() => security,
        _ if network.encryption.as_deref() == Some("on") => "WPA/WPA2",
        _ => "Open",
    }
}

/// Whether joining the network needs a password.
#[must_use]
pub fn requires_password(network: &Network) -> bool {
    network.encryption.as_deref() == Some("on")
        || network
            .security
            .as_deref()
            .is_some_and(|security| !security.is_empty())
}

/// Option label, e.g. `📶📶 HomeNet (WPA2)`.
#[must_use]
pub fn network_label(network: &Network) -> String {
    let name = if network.hidden {
        HIDDEN_NETWORK
    } else {
        network.ssid.as_str()
    };
    let security = security_label(network);

    match signal_strength(network) {
        Some(strength) => format!("{} {name} ({security})", strength.bars()),
        None => format!("{name} ({security})"),
    }
}

/// One entry of the network picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkOption {
    /// SSID submitted on selection, empty for placeholders.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

/// Picker entries for a scan result.
#[must_use]
pub fn network_options(networks: &[Network]) -> Vec<NetworkOption> {
    if networks.is_empty() {
        return vec![NetworkOption {
            value: String::new(),
            label: NO_NETWORKS.to_string(),
        }];
    }

    let placeholder = NetworkOption {
        value: String::new(),
        label: SELECT_NETWORK.to_string(),
    };
    std::iter::once(placeholder)
        .chain(networks.iter().map(|network| NetworkOption {
            value: network.ssid.clone(),
            label: network_label(network),
        }))
        .collect()
}
