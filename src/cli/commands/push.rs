//! Push command - ingest a batch from a file

use geopush::api::{self, PushQuery};
use geopush::config::GeopushConfig;
use geopush::core::services::format_response;
use geopush::output::{OutputMode, PushSummary};

use super::{open_store, read_payload};
use crate::cli::app::PushArgs;

/// Push a batch of messages into the configured store
pub fn push(args: &PushArgs, config: &GeopushConfig, mode: OutputMode) -> anyhow::Result<()> {
    let payload = read_payload(&args.file)?;
    let store = open_store(config)?;

    let query = PushQuery {
        source_type: args.source_type.clone(),
        screen_name: args.screen_name.clone(),
        harvesting_freq: args.harvesting_freq.clone(),
        lifetime: args.lifetime.clone(),
        url: args.url.clone(),
        callback: args.callback.clone(),
    };
    let outcome = api::push_batch(&store, config, &payload, &query, &args.client_host)?;

    if let Some(callback) = args.callback.as_deref() {
        println!("{}", format_response(&outcome.report, Some(callback)));
        return Ok(());
    }

    PushSummary::new(args.file.display().to_string(), outcome).render(mode);
    Ok(())
}
