use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Reference, is_false};
use crate::xml::XmlDocument;

/// Firewall wildcard for addresses and port ranges.
pub const ANY: &str = "Any";
/// NAT wildcard for ports and protocol.
pub const ANY_LOWER: &str = "any";
/// Firewall policy letting matched traffic through.
pub const POLICY_ALLOW: &str = "allow";

/// `<EdgeGatewayServiceConfiguration>`: the document submitted to
/// `configureServices`. Services left out are not touched by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfiguration {
    #[serde(rename = "@xmlns", default, skip_serializing_if = "String::is_empty")]
    pub xmlns: String,
    #[serde(rename = "FirewallService", default, skip_serializing_if = "Option::is_none")]
    pub firewall_service: Option<FirewallService>,
    #[serde(rename = "NatService", default, skip_serializing_if = "Option::is_none")]
    pub nat_service: Option<NatService>,
}

impl XmlDocument for ServiceConfiguration {
    const ROOT: &'static str = "EdgeGatewayServiceConfiguration";
    const MEDIA_TYPE: &'static str =
        "application/vnd.vmware.admin.edgeGatewayServiceConfiguration+xml";
}

impl ServiceConfiguration {
    pub fn nat_rules(&self) -> &[NatRule] {
        self.nat_service
            .as_ref()
            .map(|nat| nat.nat_rules.as_slice())
            .unwrap_or_default()
    }

    pub fn firewall_rules(&self) -> &[FirewallRule] {
        self.firewall_service
            .as_ref()
            .map(|fw| fw.firewall_rules.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NatService {
    #[serde(rename = "IsEnabled", default)]
    pub is_enabled: bool,
    #[serde(rename = "NatType", default, skip_serializing_if = "String::is_empty")]
    pub nat_type: String,
    #[serde(rename = "Policy", default, skip_serializing_if = "String::is_empty")]
    pub policy: String,
    #[serde(rename = "NatRule", default)]
    pub nat_rules: Vec<NatRule>,
    #[serde(rename = "ExternalIp", default, skip_serializing_if = "String::is_empty")]
    pub external_ip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum NatRuleType {
    #[strum(serialize = "SNAT")]
    Snat,
    #[strum(serialize = "DNAT")]
    Dnat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NatRule {
    #[serde(rename = "Description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `SNAT` or `DNAT`; kept as text so unknown rule types survive a round trip.
    #[serde(rename = "RuleType", default, skip_serializing_if = "String::is_empty")]
    pub rule_type: String,
    #[serde(rename = "IsEnabled", default)]
    pub is_enabled: bool,
    #[serde(rename = "Id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "GatewayNatRule", default, skip_serializing_if = "Option::is_none")]
    pub gateway_nat_rule: Option<GatewayNatRule>,
}

impl NatRule {
    pub fn kind(&self) -> Option<NatRuleType> {
        self.rule_type.parse().ok()
    }

    pub fn is(&self, kind: NatRuleType) -> bool {
        self.kind() == Some(kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayNatRule {
    #[serde(rename = "Interface", default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<Reference>,
    #[serde(rename = "OriginalIp", default)]
    pub original_ip: String,
    #[serde(rename = "OriginalPort", default, skip_serializing_if = "String::is_empty")]
    pub original_port: String,
    #[serde(rename = "TranslatedIp", default)]
    pub translated_ip: String,
    #[serde(rename = "TranslatedPort", default, skip_serializing_if = "String::is_empty")]
    pub translated_port: String,
    #[serde(rename = "Protocol", default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(rename = "IcmpSubType", default, skip_serializing_if = "String::is_empty")]
    pub icmp_sub_type: String,
}

impl GatewayNatRule {
    /// `href` of the interface the rule is applied on, empty if unset.
    pub fn interface_href(&self) -> &str {
        self.interface.as_ref().map_or("", |r| r.href.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallService {
    #[serde(rename = "IsEnabled", default)]
    pub is_enabled: bool,
    #[serde(rename = "DefaultAction", default, skip_serializing_if = "String::is_empty")]
    pub default_action: String,
    #[serde(rename = "LogDefaultAction", default)]
    pub log_default_action: bool,
    #[serde(rename = "FirewallRule", default)]
    pub firewall_rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    #[serde(rename = "Id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "IsEnabled", default)]
    pub is_enabled: bool,
    #[serde(rename = "MatchOnTranslate", default)]
    pub match_on_translate: bool,
    #[serde(rename = "Description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `allow` or `drop`.
    #[serde(rename = "Policy", default, skip_serializing_if = "String::is_empty")]
    pub policy: String,
    #[serde(rename = "Protocols", default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<FirewallRuleProtocols>,
    #[serde(rename = "IcmpSubType", default, skip_serializing_if = "String::is_empty")]
    pub icmp_sub_type: String,
    #[serde(rename = "Port", default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(rename = "DestinationPortRange", default)]
    pub destination_port_range: String,
    #[serde(rename = "DestinationIp", default)]
    pub destination_ip: String,
    #[serde(rename = "SourcePort", default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<i32>,
    #[serde(rename = "SourcePortRange", default, skip_serializing_if = "String::is_empty")]
    pub source_port_range: String,
    #[serde(rename = "SourceIp", default)]
    pub source_ip: String,
    #[serde(rename = "Direction", default, skip_serializing_if = "String::is_empty")]
    pub direction: String,
    #[serde(rename = "EnableLogging", default)]
    pub enable_logging: bool,
}

impl FirewallRule {
    /// True when the rule matches every protocol.
    pub fn matches_any_protocol(&self) -> bool {
        self.protocols.as_ref().is_some_and(|p| p.any)
    }
}

/// Protocol flags; only the ones set are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRuleProtocols {
    #[serde(rename = "Icmp", default, skip_serializing_if = "is_false")]
    pub icmp: bool,
    #[serde(rename = "Any", default, skip_serializing_if = "is_false")]
    pub any: bool,
    #[serde(rename = "Tcp", default, skip_serializing_if = "is_false")]
    pub tcp: bool,
    #[serde(rename = "Udp", default, skip_serializing_if = "is_false")]
    pub udp: bool,
}

impl FirewallRuleProtocols {
    pub fn any() -> Self {
        Self {
            any: true,
            ..Self::default()
        }
    }
}
