// External (public) IP address management.

use reqwest::Method;
use tracing::info;

use super::{EdgeGateway, IP_ALLOCATION_ACCEPT, MANAGE_EXTERNAL_IPS, require};
use crate::error::Error;
use crate::task::Task;
use crate::types::{Allocation, Deallocation, ExternalIpAddressActionList, Reference};

impl EdgeGateway {
    /// Ask for `count` more public addresses on the external network behind
    /// the gateway interface named `network_name`.
    ///
    /// `count` is passed through as-is.
    ///
    /// `PUT {href}/action/manageExternalIpAddresses`
    pub async fn request_public_ip(
        &mut self,
        network_name: &str,
        count: &str,
    ) -> Result<Task, Error> {
        require("network name", network_name)?;

        self.refresh().await?;
        let network = self.external_network(network_name)?;
        info!(network = network_name, count, "requesting public IPs");

        let doc = ExternalIpAddressActionList::allocate(Allocation {
            external_network_name: network.name,
            external_network_ref: network.href,
            count: count.to_owned(),
        });
        self.submit(
            MANAGE_EXTERNAL_IPS,
            Method::PUT,
            &doc,
            Some(IP_ALLOCATION_ACCEPT),
        )
        .await
    }

    /// Release `ip` back to the external network behind the gateway
    /// interface named `network_name`.
    ///
    /// `PUT {href}/action/manageExternalIpAddresses`
    pub async fn remove_public_ip(&mut self, network_name: &str, ip: &str) -> Result<Task, Error> {
        require("network name", network_name)?;
        require("IP address", ip)?;

        self.refresh().await?;
        let network = self.external_network(network_name)?;
        info!(network = network_name, ip, "releasing public IP");

        let doc = ExternalIpAddressActionList::deallocate(Deallocation {
            external_network_name: network.name,
            external_network_ref: network.href,
            external_ip_address: ip.to_owned(),
        });
        self.submit(
            MANAGE_EXTERNAL_IPS,
            Method::PUT,
            &doc,
            Some(IP_ALLOCATION_ACCEPT),
        )
        .await
    }

    /// Network reference of the interface named `name`.
    fn external_network(&self, name: &str) -> Result<Reference, Error> {
        self.document
            .interface_named(name)
            .and_then(|gif| gif.network.clone())
            .ok_or_else(|| Error::NotFound {
                kind: "gateway interface",
                name: name.to_owned(),
            })
    }
}
