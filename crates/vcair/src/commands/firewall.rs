//! Firewall command handlers.

use serde::Serialize;
use tabled::Tabled;
use vcair_api::types::{FirewallRule, FirewallRuleProtocols, ServiceConfiguration, VCLOUD_NS};
use vcair_api::xml;

use crate::cli::{FirewallArgs, FirewallCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util::{self, or_dash};

// ── Firewall rule table row ─────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct FirewallRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Protocols")]
    protocols: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn protocols(p: Option<&FirewallRuleProtocols>) -> String {
    let Some(p) = p else {
        return "-".into();
    };
    if p.any {
        return "any".into();
    }
    let names: Vec<&str> = [(p.tcp, "tcp"), (p.udp, "udp"), (p.icmp, "icmp")]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
    if names.is_empty() {
        "-".into()
    } else {
        names.join(",")
    }
}

fn firewall_row(position: usize, rule: &FirewallRule) -> FirewallRow {
    FirewallRow {
        position,
        id: or_dash(&rule.id),
        enabled: if rule.is_enabled { "yes" } else { "no" }.into(),
        policy: or_dash(&rule.policy),
        protocols: protocols(rule.protocols.as_ref()),
        source: format!("{}:{}", or_dash(&rule.source_ip), or_dash(&rule.source_port_range)),
        destination: format!(
            "{}:{}",
            or_dash(&rule.destination_ip),
            or_dash(&rule.destination_port_range)
        ),
        description: or_dash(&rule.description),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: FirewallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FirewallCommand::List => {
            let gateway = session.fetch().await?;
            let rows: Vec<FirewallRow> = gateway
                .firewall_rules()
                .iter()
                .enumerate()
                .map(|(i, r)| firewall_row(i + 1, r))
                .collect();
            let out = output::render_list(&global.output, &rows, FirewallRow::clone, |r| {
                r.id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FirewallCommand::Export => {
            let gateway = session.fetch().await?;
            let mut services = gateway
                .service_configuration()
                .cloned()
                .unwrap_or_default();
            // The embedded element inherits its namespace; a standalone
            // document has to carry it.
            if services.xmlns.is_empty() {
                services.xmlns = VCLOUD_NS.into();
            }
            let doc = xml::encode(&services)?;
            output::print_output(doc.trim_end(), global.quiet);
            Ok(())
        }

        FirewallCommand::Apply { from_file } => {
            let services: ServiceConfiguration = util::read_services_file(&from_file)?;
            if !util::confirm(
                "firewall apply",
                &format!(
                    "Replace the gateway's NAT/firewall configuration with {} ({} NAT, {} firewall rules)?",
                    from_file.display(),
                    services.nat_rules().len(),
                    services.firewall_rules().len()
                ),
                global.yes,
            )? {
                return Ok(());
            }
            let mut gateway = session.handle();
            let task = gateway.update_firewall(&services).await?;
            util::print_task(&task, global)
        }
    }
}
