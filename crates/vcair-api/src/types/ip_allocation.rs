use serde::{Deserialize, Serialize};

use crate::xml::XmlDocument;

/// Namespace of the vCloud Air network service extension.
pub const NETWORK_SERVICE_NS: &str = "http://www.vmware.com/vcloud/networkservice/1.0";

/// `<ExternalIpAddressActionList>`, sent to `manageExternalIpAddresses`.
///
/// Carries exactly one of `allocation` or `deallocation`; it only ever
/// exists for the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIpAddressActionList {
    #[serde(rename = "@xmlns", default, skip_serializing_if = "String::is_empty")]
    pub xmlns: String,
    #[serde(rename = "Allocation", default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Allocation>,
    #[serde(rename = "Deallocation", default, skip_serializing_if = "Option::is_none")]
    pub deallocation: Option<Deallocation>,
}

impl XmlDocument for ExternalIpAddressActionList {
    const ROOT: &'static str = "ExternalIpAddressActionList";
    const MEDIA_TYPE: &'static str = "application/vnd.vmware.vchs.edgeGatewayIpAllocation.list+xml";
}

impl ExternalIpAddressActionList {
    pub fn allocate(allocation: Allocation) -> Self {
        Self {
            xmlns: NETWORK_SERVICE_NS.into(),
            allocation: Some(allocation),
            deallocation: None,
        }
    }

    pub fn deallocate(deallocation: Deallocation) -> Self {
        Self {
            xmlns: NETWORK_SERVICE_NS.into(),
            allocation: None,
            deallocation: Some(deallocation),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(rename = "ExternalNetworkName", default, skip_serializing_if = "String::is_empty")]
    pub external_network_name: String,
    #[serde(rename = "ExternalNetworkRef", default, skip_serializing_if = "String::is_empty")]
    pub external_network_ref: String,
    /// Passed through untouched; the API does its own validation.
    #[serde(
        rename = "NumberOfExternalIpAddressesToAllocate",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deallocation {
    #[serde(rename = "ExternalNetworkName", default, skip_serializing_if = "String::is_empty")]
    pub external_network_name: String,
    #[serde(rename = "ExternalNetworkRef", default, skip_serializing_if = "String::is_empty")]
    pub external_network_ref: String,
    #[serde(rename = "ExternalIpAddress", default, skip_serializing_if = "String::is_empty")]
    pub external_ip_address: String,
}
