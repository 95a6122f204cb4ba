//! CLI-side configuration: applies global flag overrides on top of the
//! shared `vcair-config` profiles.

pub use vcair_config::{Config, GatewayTarget, Profile, config_path, save_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the edge gateway to talk to from config, profile, and flags.
///
/// Precedence per field is flag > profile > `[defaults]`. The session
/// token is `--token`, then the profile's `token_env`, then `VCAIR_TOKEN`,
/// then the profile's plaintext `token`.
pub fn resolve_target(global: &GlobalOpts) -> Result<GatewayTarget, CliError> {
    let cfg = vcair_config::load_config_or_default();
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.profile_names(),
            });
        }
        None => Profile::default(),
    };

    apply_overrides(&mut profile, global);

    if profile.gateway.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    tracing::debug!(profile = %profile_name, gateway = %profile.gateway, "resolved target");
    Ok(vcair_config::resolve_profile(
        &profile,
        &profile_name,
        &cfg.defaults,
    )?)
}

fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref gateway) = global.gateway {
        profile.gateway.clone_from(gateway);
    }
    if let Some(ref token) = global.token {
        profile.token = Some(token.clone());
        profile.token_env = None;
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.debug_xml {
        profile.debug_xml = Some(true);
    }
}
