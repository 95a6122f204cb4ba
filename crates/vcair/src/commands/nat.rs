//! NAT command handlers (list + 1:1 mappings).

use serde::Serialize;
use tabled::Tabled;
use vcair_api::types::NatRule;

use crate::cli::{GlobalOpts, NatArgs, NatCommand};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util::{self, or_dash};

// ── NAT rule table row ──────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct NatRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    rule_type: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Translated")]
    translated: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// `ip` or `ip:port` when a specific port is set.
fn endpoint(ip: &str, port: &str) -> String {
    if port.is_empty() || port.eq_ignore_ascii_case("any") {
        or_dash(ip)
    } else {
        format!("{ip}:{port}")
    }
}

fn nat_row(position: usize, rule: &NatRule) -> NatRow {
    let g = rule.gateway_nat_rule.clone().unwrap_or_default();
    NatRow {
        position,
        id: or_dash(&rule.id),
        rule_type: or_dash(&rule.rule_type),
        enabled: if rule.is_enabled { "yes" } else { "no" }.into(),
        original: endpoint(&g.original_ip, &g.original_port),
        translated: endpoint(&g.translated_ip, &g.translated_port),
        protocol: or_dash(&g.protocol),
        interface: g.interface.map_or_else(
            || "-".into(),
            |r| if r.name.is_empty() { or_dash(&r.href) } else { r.name },
        ),
        description: or_dash(&rule.description),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: NatArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        NatCommand::List => {
            let gateway = session.fetch().await?;
            let rows: Vec<NatRow> = gateway
                .nat_rules()
                .iter()
                .enumerate()
                .map(|(i, r)| nat_row(i + 1, r))
                .collect();
            let out = output::render_list(&global.output, &rows, NatRow::clone, |r| {
                r.id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NatCommand::Map {
            internal,
            external,
            description,
            inbound_any,
            outbound_any,
        } => {
            let mut gateway = session.handle();
            let task = gateway
                .create_1to1_mapping(&internal, &external, &description, inbound_any, outbound_any)
                .await?;
            util::print_task(&task, global)
        }

        NatCommand::Unmap { internal, external } => {
            if !util::confirm(
                "nat unmap",
                &format!("Remove the 1:1 mapping {internal} <-> {external} and its allow-any rules?"),
                global.yes,
            )? {
                return Ok(());
            }
            let mut gateway = session.handle();
            let task = gateway.remove_1to1_mapping(&internal, &external).await?;
            util::print_task(&task, global)
        }
    }
}

#[cfg(test)]
mod tests {
    use vcair_api::types::{GatewayNatRule, Reference};

    use super::*;

    #[test]
    fn row_shows_ports_only_when_specific() {
        let rule = NatRule {
            rule_type: "DNAT".into(),
            is_enabled: true,
            gateway_nat_rule: Some(GatewayNatRule {
                interface: Some(Reference::from_href("https://vca/network/1")),
                original_ip: "203.0.113.9".into(),
                original_port: "2222".into(),
                translated_ip: "10.0.0.5".into(),
                translated_port: "any".into(),
                protocol: "tcp".into(),
                ..GatewayNatRule::default()
            }),
            ..NatRule::default()
        };

        let row = nat_row(1, &rule);
        assert_eq!(row.original, "203.0.113.9:2222");
        assert_eq!(row.translated, "10.0.0.5");
        assert_eq!(row.interface, "https://vca/network/1");
        assert_eq!(row.id, "-");
    }
}
