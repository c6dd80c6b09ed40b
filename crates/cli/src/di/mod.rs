mod dns;
mod repositories;

pub use dns::DnsServices;
pub use repositories::Repositories;

use regieleki_api::AppState;
use regieleki_domain::Config;
use regieleki_infrastructure::system::load_or_create_token;
use std::path::Path;
use tracing::info;

pub async fn build_app_state(config: &Config, repos: &Repositories) -> anyhow::Result<AppState> {
    let token = match config.auth.token_path() {
        Some(path) => {
            let token = load_or_create_token(Path::new(path)).await?;
            info!(path, "API token loaded");
            Some(token)
        }
        None => {
            info!("API authentication disabled");
            None
        }
    };

    Ok(AppState::new(repos.records.clone(), token))
}
