use serde::{Deserialize, Serialize};

use super::{Reference, ServiceConfiguration};

/// `InterfaceType` value of the externally facing interface.
pub const UPLINK: &str = "uplink";

/// `<EdgeGateway>` as returned by `GET {gateway href}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeGateway {
    #[serde(rename = "@xmlns", default, skip_serializing_if = "String::is_empty")]
    pub xmlns: String,
    #[serde(rename = "@href", default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(rename = "@type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "@status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(rename = "Description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "Configuration", default)]
    pub configuration: GatewayConfiguration,
}

impl EdgeGateway {
    /// An otherwise empty document that only knows where it lives.
    pub fn at(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn interfaces(&self) -> &[GatewayInterface] {
        &self.configuration.gateway_interfaces.interfaces
    }

    /// Network reference of the uplink interface.
    ///
    /// When several interfaces are tagged `uplink` the last one wins, which
    /// is how the gateway's own tooling has always resolved it.
    pub fn uplink(&self) -> Option<&Reference> {
        self.interfaces()
            .iter()
            .filter(|gif| gif.is_uplink())
            .filter_map(|gif| gif.network.as_ref())
            .next_back()
    }

    /// Gateway interface whose `Name` equals `name`.
    pub fn interface_named(&self, name: &str) -> Option<&GatewayInterface> {
        self.interfaces().iter().find(|gif| gif.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfiguration {
    #[serde(
        rename = "GatewayBackingConfig",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub backing_config: String,
    #[serde(rename = "GatewayInterfaces", default)]
    pub gateway_interfaces: GatewayInterfaces,
    #[serde(
        rename = "EdgeGatewayServiceConfiguration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_configuration: Option<ServiceConfiguration>,
    #[serde(rename = "HaEnabled", default)]
    pub ha_enabled: bool,
    #[serde(rename = "UseDefaultRouteForDnsRelay", default)]
    pub use_default_route_for_dns_relay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayInterfaces {
    #[serde(rename = "GatewayInterface", default)]
    pub interfaces: Vec<GatewayInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayInterface {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "DisplayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(rename = "Network", default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Reference>,
    /// `uplink` or `internal`.
    #[serde(rename = "InterfaceType", default)]
    pub interface_type: String,
    #[serde(
        rename = "SubnetParticipation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subnet_participation: Option<SubnetParticipation>,
    #[serde(rename = "UseForDefaultRoute", default)]
    pub use_for_default_route: bool,
}

impl GatewayInterface {
    pub fn is_uplink(&self) -> bool {
        self.interface_type == UPLINK
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubnetParticipation {
    #[serde(rename = "Gateway", default)]
    pub gateway: String,
    #[serde(rename = "Netmask", default)]
    pub netmask: String,
    #[serde(rename = "IpAddress", default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(rename = "IpRanges", default, skip_serializing_if = "Option::is_none")]
    pub ip_ranges: Option<IpRanges>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpRanges {
    #[serde(rename = "IpRange", default)]
    pub ranges: Vec<IpRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpRange {
    #[serde(rename = "StartAddress")]
    pub start_address: String,
    #[serde(rename = "EndAddress")]
    pub end_address: String,
}
