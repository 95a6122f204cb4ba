// Rule ownership for 1:1 NAT mappings
//
// A 1:1 mapping is not a first-class object on the gateway: it is an SNAT
// and a DNAT rule on the uplink, optionally accompanied by two allow-any
// firewall rules. Rules are recognised structurally, field by field; no
// identifier is stored anywhere. Everything here is pure.

use crate::types::{
    ANY, ANY_LOWER, FirewallRule, FirewallRuleProtocols, GatewayNatRule, NatRule, NatRuleType,
    POLICY_ALLOW, Reference,
};

/// A 1:1 mapping of `internal` to `external` on the uplink `uplink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneToOneMapping<'a> {
    pub internal: &'a str,
    pub external: &'a str,
    /// `href` of the uplink interface's network.
    pub uplink: &'a str,
}

impl<'a> OneToOneMapping<'a> {
    pub fn new(internal: &'a str, external: &'a str, uplink: &'a str) -> Self {
        Self {
            internal,
            external,
            uplink,
        }
    }

    // ── Recognition ──────────────────────────────────────────────────

    /// The DNAT half: external to internal, any port, any protocol.
    pub fn is_dnat(&self, rule: &NatRule) -> bool {
        let Some(body) = rule.gateway_nat_rule.as_ref() else {
            return false;
        };
        rule.is(NatRuleType::Dnat)
            && body.original_ip == self.external
            && body.translated_ip == self.internal
            && body.original_port == ANY_LOWER
            && body.translated_port == ANY_LOWER
            && body.protocol == ANY_LOWER
            && body.interface_href() == self.uplink
    }

    /// The SNAT half: internal to external.
    pub fn is_snat(&self, rule: &NatRule) -> bool {
        let Some(body) = rule.gateway_nat_rule.as_ref() else {
            return false;
        };
        rule.is(NatRuleType::Snat)
            && body.original_ip == self.internal
            && body.translated_ip == self.external
            && body.interface_href() == self.uplink
    }

    pub fn owns_nat(&self, rule: &NatRule) -> bool {
        self.is_dnat(rule) || self.is_snat(rule)
    }

    /// Inbound allow-any: anything to `external`.
    pub fn is_inbound_allow(&self, rule: &FirewallRule) -> bool {
        is_allow_any(rule) && rule.source_ip == ANY && rule.destination_ip == self.external
    }

    /// Outbound allow-any: `internal` to anything.
    pub fn is_outbound_allow(&self, rule: &FirewallRule) -> bool {
        is_allow_any(rule) && rule.source_ip == self.internal && rule.destination_ip == ANY
    }

    pub fn owns_firewall(&self, rule: &FirewallRule) -> bool {
        self.is_inbound_allow(rule) || self.is_outbound_allow(rule)
    }

    // ── Filtering ────────────────────────────────────────────────────

    /// `rules` without the mapping's SNAT/DNAT pair, order preserved.
    pub fn strip_nat(&self, rules: &[NatRule]) -> Vec<NatRule> {
        rules
            .iter()
            .filter(|rule| !self.owns_nat(rule))
            .cloned()
            .collect()
    }

    /// `rules` without the mapping's allow-any pair, order preserved.
    pub fn strip_firewall(&self, rules: &[FirewallRule]) -> Vec<FirewallRule> {
        rules
            .iter()
            .filter(|rule| !self.owns_firewall(rule))
            .cloned()
            .collect()
    }

    // ── Construction ─────────────────────────────────────────────────

    pub fn snat_rule(&self, description: &str) -> NatRule {
        NatRule {
            description: description.to_owned(),
            rule_type: NatRuleType::Snat.to_string(),
            is_enabled: true,
            id: String::new(),
            gateway_nat_rule: Some(GatewayNatRule {
                interface: Some(Reference::from_href(self.uplink)),
                original_ip: self.internal.to_owned(),
                translated_ip: self.external.to_owned(),
                protocol: ANY_LOWER.to_owned(),
                ..GatewayNatRule::default()
            }),
        }
    }

    pub fn dnat_rule(&self, description: &str) -> NatRule {
        NatRule {
            description: description.to_owned(),
            rule_type: NatRuleType::Dnat.to_string(),
            is_enabled: true,
            id: String::new(),
            gateway_nat_rule: Some(GatewayNatRule {
                interface: Some(Reference::from_href(self.uplink)),
                original_ip: self.external.to_owned(),
                original_port: ANY_LOWER.to_owned(),
                translated_ip: self.internal.to_owned(),
                translated_port: ANY_LOWER.to_owned(),
                protocol: ANY_LOWER.to_owned(),
                ..GatewayNatRule::default()
            }),
        }
    }

    pub fn inbound_allow_rule(&self, description: &str) -> FirewallRule {
        allow_any_rule(description, ANY, self.external)
    }

    pub fn outbound_allow_rule(&self, description: &str) -> FirewallRule {
        allow_any_rule(description, self.internal, ANY)
    }
}

fn is_allow_any(rule: &FirewallRule) -> bool {
    rule.policy == POLICY_ALLOW
        && rule.matches_any_protocol()
        && rule.destination_port_range == ANY
        && rule.source_port_range == ANY
}

fn allow_any_rule(description: &str, source_ip: &str, destination_ip: &str) -> FirewallRule {
    FirewallRule {
        description: description.to_owned(),
        is_enabled: true,
        policy: POLICY_ALLOW.to_owned(),
        protocols: Some(FirewallRuleProtocols::any()),
        destination_port_range: ANY.to_owned(),
        destination_ip: destination_ip.to_owned(),
        source_port_range: ANY.to_owned(),
        source_ip: source_ip.to_owned(),
        enable_logging: false,
        ..FirewallRule::default()
    }
}
