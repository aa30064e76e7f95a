use crate::{Cli, CliError, CliResult, Commands};

use edu_auth::{ExpiryPolicy, FileStorage, TokenStore};
use edu_client::Client;
use edu_config::Config;
use edu_core::{Clock, OrganizationId, SystemClock};
use edu_session::{Session, SessionCache, TenantResolver};

use std::str::FromStr;
use std::sync::Arc;

use chrono::TimeDelta;
use log::debug;
use serde_json::{Value, json};

/// Build a session from configuration, with command line overrides applied.
pub fn build_session(config: &Config, cli: &Cli) -> CliResult<Session> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let base_url = cli.server.as_deref().unwrap_or(&config.api.base_url);
    let client =
        Arc::new(Client::with_timeout(base_url, config.api.timeout())?.with_clock(clock.clone()));
    debug!("Backend: {}", client.base_url);

    let storage = Arc::new(FileStorage::new(config.token_storage_path()?));
    let token_store = TokenStore::new(storage, clock.clone())
        .with_key(config.token.key.clone())
        .with_expiry_policy(ExpiryPolicy::from_purge_flag(
            config.token.purge_expired_on_read,
        ));

    let cache = SessionCache::new(client.clone(), clock.clone())
        .with_freshness(seconds(config.session.freshness_secs)?);

    let host = cli.host.clone().or_else(|| config.tenant.host.clone());
    let resolver =
        TenantResolver::standard(client.clone(), clock, host, config.tenant.default_key()?);

    Ok(Session::new(token_store, cache, resolver, client))
}

/// Run one command and return its JSON output.
pub async fn execute(session: &Session, command: &Commands, config: &Config) -> CliResult<Value> {
    match command {
        Commands::Login { token, ttl_secs } => {
            let ttl = seconds(ttl_secs.unwrap_or(config.token.ttl_secs))?;
            let credential = session.login(token, ttl)?;
            Ok(json!({ "expires_at": credential.expires_at() }))
        }
        Commands::Logout => {
            session.logout()?;
            Ok(json!({ "signed_out": true }))
        }
        Commands::Whoami { refresh } => {
            let profile = session.current_profile(*refresh).await?;
            Ok(serde_json::to_value(profile)?)
        }
        Commands::Resolve { org_id } => {
            let organization_id = org_id.as_deref().map(OrganizationId::from_str).transpose()?;
            let credential = session.token_store().read();
            let resolution = session
                .resolver()
                .resolve_with_source(organization_id.as_ref(), credential.as_ref())
                .await;
            Ok(serde_json::to_value(resolution)?)
        }
        Commands::Bootstrap => {
            let page = session.bootstrap().await?;
            Ok(serde_json::to_value(page)?)
        }
    }
}

#[track_caller]
pub(crate) fn seconds(secs: u64) -> CliResult<TimeDelta> {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| CliError::invalid_argument(format!("{secs}s is out of range")))
}
