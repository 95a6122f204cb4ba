// Edge gateway resource handle
//
// Holds an owned snapshot of one `<EdgeGateway>` and the client used to talk
// to it. Every mutating operation starts by re-reading the gateway, so the
// snapshot is always replaced wholesale rather than merged into. Operations
// live in separate files as inherent methods: `mapping` for NAT/firewall
// rewrites, `public_ip` for external address management.

mod mapping;
mod public_ip;
pub mod rules;

use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::client::VcaClient;
use crate::error::Error;
use crate::task::Task;
use crate::types::{self, FirewallRule, GatewayInterface, NatRule, Reference, ServiceConfiguration};
use crate::xml::{self, XmlDocument};

pub use rules::OneToOneMapping;

/// Action reconfiguring NAT/firewall/etc. services (POST).
pub const CONFIGURE_SERVICES: &str = "configureServices";
/// Action allocating or releasing external addresses (PUT).
pub const MANAGE_EXTERNAL_IPS: &str = "manageExternalIpAddresses";
/// `Accept` required by the IP allocation extension.
pub const IP_ALLOCATION_ACCEPT: &str = "application/xml;version=5.7";

/// A remote edge gateway and the operations that rewrite its services.
///
/// Mutating operations take `&mut self`: one handle performs one
/// read-modify-write cycle at a time. Two handles pointing at the same
/// gateway are not coordinated; the last submission wins.
#[derive(Debug, Clone)]
pub struct EdgeGateway {
    document: types::EdgeGateway,
    client: VcaClient,
}

impl EdgeGateway {
    pub fn new(client: VcaClient, document: types::EdgeGateway) -> Self {
        Self { document, client }
    }

    /// Build a handle from a gateway address and read it once.
    pub async fn fetch(client: VcaClient, href: &str) -> Result<Self, Error> {
        let mut gateway = Self::new(client, types::EdgeGateway::at(href));
        gateway.refresh().await?;
        Ok(gateway)
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn document(&self) -> &types::EdgeGateway {
        &self.document
    }

    pub fn href(&self) -> &str {
        &self.document.href
    }

    pub fn client(&self) -> &VcaClient {
        &self.client
    }

    pub fn service_configuration(&self) -> Option<&ServiceConfiguration> {
        self.document.configuration.service_configuration.as_ref()
    }

    pub fn nat_rules(&self) -> &[NatRule] {
        self.service_configuration()
            .map(ServiceConfiguration::nat_rules)
            .unwrap_or_default()
    }

    pub fn firewall_rules(&self) -> &[FirewallRule] {
        self.service_configuration()
            .map(ServiceConfiguration::firewall_rules)
            .unwrap_or_default()
    }

    pub fn interfaces(&self) -> &[GatewayInterface] {
        self.document.interfaces()
    }

    pub fn uplink(&self) -> Option<&Reference> {
        self.document.uplink()
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Re-read the gateway and replace the held snapshot with the result.
    ///
    /// Nothing from the previous snapshot survives; decoding always starts
    /// from an empty document so list elements are never duplicated.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let wrap = |source: Error| Error::Refresh {
            source: Box::new(source),
        };

        if self.document.href.is_empty() {
            return Err(wrap(Error::MissingHref));
        }
        let url = Url::parse(&self.document.href).map_err(|e| wrap(e.into()))?;
        debug!(href = %url, "refreshing edge gateway");

        let mut fresh: types::EdgeGateway = self.client.get_xml(url).await.map_err(wrap)?;
        if fresh.href.is_empty() {
            fresh.href.clone_from(&self.document.href);
        }
        self.document = fresh;
        Ok(())
    }

    // ── Submission plumbing ──────────────────────────────────────────

    /// `{href}/action/{action}`.
    fn action_url(&self, action: &str) -> Result<Url, Error> {
        if self.document.href.is_empty() {
            return Err(Error::MissingHref);
        }
        let mut url = Url::parse(&self.document.href)?;
        let path = format!("{}/action/{action}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        Ok(url)
    }

    /// Send `doc` to an action sub-path and wrap the answer as a `Task`.
    async fn submit<D: XmlDocument>(
        &self,
        action: &'static str,
        method: Method,
        doc: &D,
        accept: Option<&str>,
    ) -> Result<Task, Error> {
        let url = self.action_url(action)?;

        let body = match self.client.send_xml(method, url, doc, accept).await {
            Ok(body) => body,
            Err(err @ Error::Serialization { .. }) => return Err(err),
            Err(source) => {
                return Err(Error::Submission {
                    operation: action,
                    source: Box::new(source),
                });
            }
        };

        let document: types::TaskDocument = xml::decode(&body).map_err(|source| {
            Error::TaskDecode {
                source: Box::new(source),
            }
        })?;
        debug!(task = %document.href, status = %document.status, "task accepted");

        Ok(Task::new(self.client.clone(), document))
    }

    async fn configure_services(&self, services: &ServiceConfiguration) -> Result<Task, Error> {
        self.submit(CONFIGURE_SERVICES, Method::POST, services, None)
            .await
    }
}

fn require(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}
