use anyhow::Context;
use settle_config::SettleConfig;
use settle_fetch::{FetcherOptions, HttpFetcher};

use crate::cli::GlobalFlags;

/// Shared resources built once per invocation.
pub struct AppContext {
    pub config: SettleConfig,
    pub fetcher: HttpFetcher,
}

impl AppContext {
    /// Build the HTTP client from `[http]`, letting `--timeout-secs` win.
    pub fn init(mut config: SettleConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(secs) = flags.timeout_secs {
            config.http.timeout_secs = secs;
        }

        let options = FetcherOptions {
            timeout: config.http.timeout(),
            user_agent: config.http.user_agent.clone(),
        };
        let fetcher = HttpFetcher::new(&options).context("failed to build HTTP client")?;
        tracing::debug!(
            timeout_secs = config.http.timeout_secs,
            user_agent = %options.user_agent,
            "http client ready"
        );

        Ok(Self { config, fetcher })
    }
}
