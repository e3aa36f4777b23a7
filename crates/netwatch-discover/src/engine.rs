//! Reconciliation engine: one scan cycle from probe to persisted cache.
//!
//! Per cycle: resolve the network name, load the cache, probe, then for
//! each device enrich → (first cycle: add to inventory) → novelty check
//! against the cache as loaded → (later cycles: alert if new) → upsert.
//! The first completed cycle sends one inventory message instead of
//! individual alerts. The cache is written back unconditionally.
//!
//! Only a failure of the primary probe aborts a cycle. Every other failure
//! is logged and the cycle carries on.

use std::collections::HashSet;

use chrono::Utc;
use netwatch_core::types::NETWORK_PLACEHOLDER;
use netwatch_core::{Device, DeviceSource};
use uuid::Uuid;

use crate::context::AppContext;
use crate::notify::{compose_inventory, format_device_details};

/// Outcome of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    /// The primary probe failed; cache and notifications were untouched.
    Aborted,
    Completed {
        /// Devices observed across all sources.
        total: usize,
        /// Devices whose MAC was absent from the cache at cycle start.
        new: usize,
        /// Whether this cycle delivered the initial inventory message.
        inventory_sent: bool,
    },
}

/// Drives scan cycles against an [`AppContext`].
///
/// Holds the only cross-cycle state outside the cache file: whether the
/// initial inventory has been attempted. The flag is never reset.
pub struct Reconciler {
    ctx: AppContext,
    first_run_done: bool,
}

impl Reconciler {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            first_run_done: false,
        }
    }

    pub fn first_run_done(&self) -> bool {
        self.first_run_done
    }

    /// Run one full cycle. Never fails; outcomes are logged and summarized.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cycle_id = Uuid::new_v4();
        let interface = self.ctx.config.interface.clone();
        tracing::info!(cycle_id = %cycle_id, interface = %interface, "Scan cycle started");

        let network = self
            .ctx
            .network_name
            .network_name(&interface)
            .await
            .unwrap_or_else(|| NETWORK_PLACEHOLDER.to_string());

        let mut known = self.ctx.cache.load();

        let observed = match self.observe(&interface).await {
            Some(observed) => observed,
            None => {
                tracing::info!(cycle_id = %cycle_id, "Scan cycle aborted");
                return CycleReport::Aborted;
            }
        };

        let previously_known = known.macs();
        let first_run = !self.first_run_done;
        let total = observed.len();
        let mut inventory = Vec::new();
        let mut announced = HashSet::new();

        for (source, mut device) in observed {
            self.ctx.enricher.enrich(&mut device).await;

            if first_run {
                inventory.push(format_device_details(&device, source, &network));
            }

            let is_new =
                !previously_known.contains(&device.mac) && announced.insert(device.mac.clone());

            if is_new && !first_run {
                tracing::info!(
                    cycle_id = %cycle_id,
                    mac = %device.mac,
                    ip = %device.ip,
                    source = %source,
                    "New device detected"
                );
                if let Err(e) = self
                    .ctx
                    .notifier
                    .notify_new_device(&device, source, &network)
                    .await
                {
                    tracing::warn!(mac = %device.mac, error = %e, "Failed to alert for new device");
                }
            }

            known.upsert(device);
        }

        let mut inventory_sent = false;
        if first_run {
            let message = compose_inventory(&inventory, Utc::now());
            match self.ctx.notifier.notify_bulk(&message).await {
                Ok(()) => inventory_sent = true,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to send initial inventory report");
                }
            }
            self.first_run_done = true;
        }

        if let Err(e) = self.ctx.cache.persist(&known) {
            tracing::error!(
                path = %self.ctx.cache.path().display(),
                error = %e,
                "Failed to persist device cache"
            );
        }

        let new = announced.len();
        tracing::info!(
            cycle_id = %cycle_id,
            network = %network,
            total,
            new,
            known = known.len(),
            inventory_sent,
            "Scan complete"
        );

        CycleReport::Completed {
            total,
            new,
            inventory_sent,
        }
    }

    /// Collect devices from the primary probe and, if configured, the mesh.
    /// `None` means the primary probe failed and the cycle must stop.
    async fn observe(&self, interface: &str) -> Option<Vec<(DeviceSource, Device)>> {
        let lan = match self.ctx.probe.probe(interface).await {
            Ok(devices) => devices,
            Err(e) => {
                tracing::error!(interface = %interface, error = %e, "Failed to scan local network");
                return None;
            }
        };

        let mut observed: Vec<_> = lan.into_iter().map(|d| (DeviceSource::Lan, d)).collect();

        if let Some(mesh) = &self.ctx.mesh_probe {
            match mesh.probe(interface).await {
                Ok(peers) => observed.extend(peers.into_iter().map(|d| (DeviceSource::Mesh, d))),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to scan Tailscale peers, continuing with LAN only");
                }
            }
        }

        Some(observed)
    }
}
