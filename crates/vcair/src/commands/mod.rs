//! Command dispatch: bridges CLI args -> gateway operations -> output formatting.

pub mod config_cmd;
pub mod firewall;
pub mod gateway;
pub mod ip;
pub mod nat;
pub mod task;
pub mod util;

use std::sync::Arc;

use url::Url;
use vcair_api::{EdgeGateway, TracingObserver, VcaClient};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// A configured client plus the gateway it targets.
///
/// Nothing is fetched until a handler asks for the gateway, so prompts and
/// argument checks run before any request.
pub struct Session {
    client: VcaClient,
    href: Url,
}

impl Session {
    pub fn open(global: &GlobalOpts) -> Result<Self, CliError> {
        let target = config::resolve_target(global)?;

        let mut client = VcaClient::new(&target.transport)?;
        if target.debug_xml {
            client = client.with_observer(Arc::new(TracingObserver));
        }

        Ok(Self {
            client,
            href: target.href,
        })
    }

    pub fn client(&self) -> &VcaClient {
        &self.client
    }

    /// A handle that has not read the gateway yet. Mutating operations
    /// refresh it themselves.
    pub fn handle(&self) -> EdgeGateway {
        EdgeGateway::new(
            self.client.clone(),
            vcair_api::types::EdgeGateway::at(self.href.as_str()),
        )
    }

    /// Read the gateway once.
    pub async fn fetch(&self) -> Result<EdgeGateway, CliError> {
        Ok(EdgeGateway::fetch(self.client.clone(), self.href.as_str()).await?)
    }
}

/// Dispatch a gateway-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Gateway(args) => gateway::handle(session, args, global).await,
        Command::Nat(args) => nat::handle(session, args, global).await,
        Command::Firewall(args) => firewall::handle(session, args, global).await,
        Command::Ip(args) => ip::handle(session, args, global).await,
        Command::Task(args) => task::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
