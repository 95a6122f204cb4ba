//! Public IP command handlers.

use crate::cli::{GlobalOpts, IpArgs, IpCommand};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: IpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut gateway = session.handle();

    let task = match args.command {
        IpCommand::Allocate { network, count } => {
            gateway.request_public_ip(&network, &count).await?
        }
        IpCommand::Release { network, ip } => {
            if !util::confirm(
                "ip release",
                &format!("Release public IP {ip} on '{network}'?"),
                global.yes,
            )? {
                return Ok(());
            }
            gateway.remove_public_ip(&network, &ip).await?
        }
    };

    util::print_task(&task, global)
}
