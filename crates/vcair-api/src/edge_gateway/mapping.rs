// NAT / firewall rewrites: 1:1 mappings and bulk replacement.

use tracing::{debug, info};

use super::rules::OneToOneMapping;
use super::{EdgeGateway, require};
use crate::error::Error;
use crate::task::Task;
use crate::types::{FirewallService, NatService, ServiceConfiguration, VCLOUD_NS};

impl EdgeGateway {
    /// Remove the 1:1 mapping of `internal` to `external`.
    ///
    /// Drops the mapping's SNAT/DNAT pair and its two allow-any firewall
    /// rules; every other rule is submitted back unchanged and in order.
    /// The NAT service is always submitted enabled.
    ///
    /// `POST {href}/action/configureServices`
    pub async fn remove_1to1_mapping(
        &mut self,
        internal: &str,
        external: &str,
    ) -> Result<Task, Error> {
        require("internal address", internal)?;
        require("external address", external)?;

        self.refresh().await?;
        let uplink = self.uplink_href()?;
        let mapping = OneToOneMapping::new(internal, external, &uplink);

        let mut services = self.take_services();

        let nat = services.nat_service.get_or_insert_with(NatService::default);
        let before = nat.nat_rules.len();
        nat.nat_rules = mapping.strip_nat(&nat.nat_rules);
        nat.is_enabled = true;
        let removed_nat = before - nat.nat_rules.len();

        let mut removed_fw = 0;
        if let Some(fw) = services.firewall_service.as_mut() {
            let before = fw.firewall_rules.len();
            fw.firewall_rules = mapping.strip_firewall(&fw.firewall_rules);
            removed_fw = before - fw.firewall_rules.len();
        }

        info!(
            internal,
            external, removed_nat, removed_fw, "removing 1:1 mapping"
        );
        self.submit_and_restore(services).await
    }

    /// Add a 1:1 mapping of `internal` to `external` on the uplink.
    ///
    /// Appends an SNAT and a DNAT rule, then the inbound and/or outbound
    /// allow-any firewall rules when requested. Existing rules are neither
    /// removed nor reordered.
    ///
    /// `POST {href}/action/configureServices`
    pub async fn create_1to1_mapping(
        &mut self,
        internal: &str,
        external: &str,
        description: &str,
        inbound_any: bool,
        outbound_any: bool,
    ) -> Result<Task, Error> {
        require("internal address", internal)?;
        require("external address", external)?;

        self.refresh().await?;
        let uplink = self.uplink_href()?;
        let mapping = OneToOneMapping::new(internal, external, &uplink);

        let mut services = self.take_services();

        let nat = services.nat_service.get_or_insert_with(NatService::default);
        nat.nat_rules.push(mapping.snat_rule(description));
        nat.nat_rules.push(mapping.dnat_rule(description));

        if inbound_any || outbound_any {
            let fw = services
                .firewall_service
                .get_or_insert_with(FirewallService::default);
            if inbound_any {
                fw.firewall_rules.push(mapping.inbound_allow_rule(description));
            }
            if outbound_any {
                fw.firewall_rules.push(mapping.outbound_allow_rule(description));
            }
        }

        info!(
            internal,
            external, inbound_any, outbound_any, "creating 1:1 mapping"
        );
        self.submit_and_restore(services).await
    }

    /// Replace the gateway's service configuration with `services`.
    ///
    /// The gateway is still re-read first so a stale or unreachable handle
    /// fails before anything is written. The document is sent as given:
    /// callers own its consistency.
    ///
    /// `POST {href}/action/configureServices`
    pub async fn update_firewall(&mut self, services: &ServiceConfiguration) -> Result<Task, Error> {
        self.refresh().await?;
        debug!(
            nat_rules = services.nat_rules().len(),
            firewall_rules = services.firewall_rules().len(),
            "replacing service configuration"
        );
        self.configure_services(services).await
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn uplink_href(&self) -> Result<String, Error> {
        self.uplink()
            .map(|r| r.href.clone())
            .ok_or_else(|| Error::NotFound {
                kind: "interface of type",
                name: crate::types::UPLINK.into(),
            })
    }

    /// Move the service configuration out of the snapshot for editing.
    fn take_services(&mut self) -> ServiceConfiguration {
        let mut services = self
            .document
            .configuration
            .service_configuration
            .take()
            .unwrap_or_default();
        if services.xmlns.is_empty() {
            services.xmlns = VCLOUD_NS.into();
        }
        services
    }

    /// Submit an edited configuration and put it back into the snapshot,
    /// so the handle reflects what was sent.
    async fn submit_and_restore(&mut self, services: ServiceConfiguration) -> Result<Task, Error> {
        let result = self.configure_services(&services).await;
        self.document.configuration.service_configuration = Some(services);
        result
    }
}
