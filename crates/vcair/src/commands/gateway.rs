//! Gateway command handlers.

use serde::Serialize;
use tabled::Tabled;
use vcair_api::types::GatewayInterface;

use crate::cli::{GatewayArgs, GatewayCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::Session;
use super::util::or_dash;

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GatewayView {
    name: String,
    href: String,
    status: Option<i32>,
    uplink: Option<String>,
    interfaces: usize,
    nat_enabled: bool,
    nat_rules: usize,
    firewall_enabled: bool,
    firewall_rules: usize,
}

fn gateway_detail(g: &GatewayView) -> String {
    [
        format!("Name:           {}", g.name),
        format!("Href:           {}", g.href),
        format!(
            "Status:         {}",
            g.status.map_or_else(|| "-".into(), |s| s.to_string())
        ),
        format!("Uplink:         {}", g.uplink.as_deref().unwrap_or("-")),
        format!("Interfaces:     {}", g.interfaces),
        format!("NAT:            {} ({} rules)", on_off(g.nat_enabled), g.nat_rules),
        format!(
            "Firewall:       {} ({} rules)",
            on_off(g.firewall_enabled),
            g.firewall_rules
        ),
    ]
    .join("\n")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

// ── Interface table row ─────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Gateway IP")]
    gateway_ip: String,
    #[tabled(rename = "Default Route")]
    default_route: String,
}

impl From<&GatewayInterface> for InterfaceRow {
    fn from(gif: &GatewayInterface) -> Self {
        Self {
            name: gif.name.clone(),
            kind: gif.interface_type.clone(),
            network: gif
                .network
                .as_ref()
                .map_or_else(|| "-".into(), |n| or_dash(&n.href)),
            gateway_ip: gif
                .subnet_participation
                .as_ref()
                .map_or_else(|| "-".into(), |s| or_dash(&s.gateway)),
            default_route: if gif.use_for_default_route { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: GatewayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let gateway = session.fetch().await?;

    let out = match args.command {
        GatewayCommand::Show => {
            let services = gateway.service_configuration();
            let view = GatewayView {
                name: gateway.document().name.clone(),
                href: gateway.href().to_owned(),
                status: gateway.document().status,
                uplink: gateway.uplink().map(|r| r.href.clone()),
                interfaces: gateway.interfaces().len(),
                nat_enabled: services
                    .and_then(|s| s.nat_service.as_ref())
                    .is_some_and(|n| n.is_enabled),
                nat_rules: gateway.nat_rules().len(),
                firewall_enabled: services
                    .and_then(|s| s.firewall_service.as_ref())
                    .is_some_and(|f| f.is_enabled),
                firewall_rules: gateway.firewall_rules().len(),
            };
            output::render_single(&global.output, &view, gateway_detail, |g| g.href.clone())?
        }
        GatewayCommand::Interfaces => {
            let rows: Vec<InterfaceRow> =
                gateway.interfaces().iter().map(InterfaceRow::from).collect();
            output::render_list(
                &global.output,
                &rows,
                InterfaceRow::clone,
                |r| r.name.clone(),
            )?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
