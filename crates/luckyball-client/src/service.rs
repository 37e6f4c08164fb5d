use anyhow::Context as _;

use luckyball_core::{Ticket, WeightedGenerator, freq};

use crate::config::AppConfig;
use crate::{fetch, history};

/// Bring the cached draw history up to date, preferring a stale file over a
/// failed refresh.
///
/// A fetch failure is recoverable when a cached file already exists; it is
/// only fatal when there is nothing to fall back to.
pub async fn refresh_history(config: &AppConfig) -> anyhow::Result<()> {
    match fetch::ensure_fresh(config).await {
        Ok(status) => {
            log::debug!("draw history ready ({status:?})");
            Ok(())
        }
        Err(e) if config.cache_path.exists() => {
            log::warn!(
                "refresh failed, falling back to existing {}: {e}",
                config.cache_path.display()
            );
            Ok(())
        }
        Err(e) => Err(e).context("no cached draw history and the refresh failed"),
    }
}

/// The full pipeline both delivery shells share:
/// ensure-fresh, load, analyze, generate.
pub async fn generate_tickets(config: &AppConfig, count: usize) -> anyhow::Result<Vec<Ticket>> {
    refresh_history(config).await?;

    let draws = history::load(&config.cache_path)?;
    let frequencies = freq::analyze(&draws);
    let generator = WeightedGenerator::from_frequencies(&frequencies)?;

    Ok(generator.generate(count))
}
