//! Webhook notifications.
//!
//! Messages are Discord-flavoured markdown posted as `{"content": "..."}`.
//! Bodies longer than [`MAX_CONTENT_CHARS`] are cut so that the transmitted
//! text is exactly that long and ends with [`TRUNCATION_MARKER`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use netwatch_core::types::{NETWORK_PLACEHOLDER, UNKNOWN};
use netwatch_core::{Device, DeviceSource};
use serde::Serialize;

use crate::error::{DiscoverError, Result};

/// Maximum message length accepted by the webhook, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Appended to truncated messages.
pub const TRUNCATION_MARKER: char = '…';

const INVENTORY_HEADER: &str = "🧾 **Initial Device Inventory (Wi-Fi)**\n\n";

/// Sink for human-readable device notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Alert that a device was seen for the first time.
    async fn notify_new_device(
        &self,
        device: &Device,
        source: DeviceSource,
        network_name: &str,
    ) -> Result<()>;

    /// Send a preformatted message as-is (subject to truncation).
    async fn notify_bulk(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Notifier that posts to a Discord-compatible webhook.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    async fn send(&self, content: &str) -> Result<()> {
        let content = truncate_content(content);
        let resp = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content: &content })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscoverError::WebhookStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(chars = content.chars().count(), "Webhook message delivered");
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_new_device(
        &self,
        device: &Device,
        source: DeviceSource,
        network_name: &str,
    ) -> Result<()> {
        let message = format_new_device_alert(device, source, network_name, Utc::now());
        self.send(&message).await
    }

    async fn notify_bulk(&self, text: &str) -> Result<()> {
        self.send(text).await
    }
}

/// Cut `content` to at most [`MAX_CONTENT_CHARS`] characters.
///
/// Shorter content is returned unchanged; longer content keeps its first
/// `MAX_CONTENT_CHARS - 1` characters followed by the truncation marker.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        None => content.to_string(),
        Some(_) => {
            let mut truncated: String = content.chars().take(MAX_CONTENT_CHARS - 1).collect();
            truncated.push(TRUNCATION_MARKER);
            truncated
        }
    }
}

/// Markdown detail block for one device, used in the inventory report.
pub fn format_device_details(device: &Device, source: DeviceSource, network_name: &str) -> String {
    format!(
        "📡 **Device Found**\n\
         🔗 **MAC:** `{}`\n\
         📍 **IP:** `{}`\n\
         💻 **Hostname:** `{}`\n\
         🏷️ **Vendor:** `{}`\n\
         🧠 **OS:** `{}`\n\
         📶 **Network:** `{}` on `{}`",
        device.mac,
        device.ip,
        device.hostname_or_unknown(),
        device.manufacturer_or_unknown(),
        device.os_guess_or_unknown(),
        display_network(network_name),
        source.label(),
    )
}

/// Markdown alert for a newly joined device.
pub fn format_new_device_alert(
    device: &Device,
    source: DeviceSource,
    network_name: &str,
    seen_at: DateTime<Utc>,
) -> String {
    format!(
        "🚨 **New Device Joined the Network!**\n\n\
         📍 **Source:** {}\n\
         📶 **SSID:** `{}`\n\
         📡 **IP:** `{}`\n\
         🔗 **MAC:** `{}`\n\
         💻 **Hostname:** `{}`\n\
         🏷️ **Vendor:** `{}`\n\
         🧠 **OS:** `{}`\n\
         🕒 **Seen at:** `{}`",
        source.label(),
        display_network(network_name),
        device.ip,
        device.mac,
        device.hostname_or_unknown(),
        device.manufacturer_or_unknown(),
        device.os_guess_or_unknown(),
        rfc1123(seen_at),
    )
}

/// Header, the per-device blocks separated by blank lines, and a footer.
pub fn compose_inventory(blocks: &[String], captured_at: DateTime<Utc>) -> String {
    let mut message = String::from(INVENTORY_HEADER);
    for block in blocks {
        message.push_str(block);
        message.push_str("\n\n");
    }
    message.push_str(&format!("🕒 Captured at: `{}`", rfc1123(captured_at)));
    message
}

fn display_network(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() || name == UNKNOWN {
        NETWORK_PLACEHOLDER
    } else {
        name
    }
}

fn rfc1123(ts: DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}
