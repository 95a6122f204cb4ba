// vCloud XML schema types
//
// Hand-written subset of the vCloud 5.6 schema covering edge gateways, their
// service configuration, tasks, and the vCloud Air IP allocation actions.
// Element and attribute names follow the schema exactly; optional scalar
// elements default to empty and are skipped on output when empty.

mod gateway;
mod ip_allocation;
mod services;
mod task;

use serde::{Deserialize, Serialize};

pub use gateway::{
    EdgeGateway, GatewayConfiguration, GatewayInterface, GatewayInterfaces, IpRange, IpRanges,
    SubnetParticipation, UPLINK,
};
pub use ip_allocation::{Allocation, Deallocation, ExternalIpAddressActionList, NETWORK_SERVICE_NS};
pub use services::{
    ANY, ANY_LOWER, FirewallRule, FirewallRuleProtocols, FirewallService, GatewayNatRule,
    NatRule, NatRuleType, NatService, POLICY_ALLOW, ServiceConfiguration,
};
pub use task::{TaskDocument, TaskError, TaskStatus};

/// vCloud 1.5+ core namespace.
pub const VCLOUD_NS: &str = "http://www.vmware.com/vcloud/v1.5";

/// A link to another entity: `<Network href="..." name="..." type="..."/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "@href", default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(rename = "@id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "@type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(rename = "@name", default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Reference {
    /// A reference carrying only an address.
    pub fn from_href(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
