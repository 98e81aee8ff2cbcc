//! The update command: one full data-update pipeline run

use tracing::info;

use super::shared::setup_logging;
use crate::Result;
use crate::app::adapters::api_client::RecallsApiClient;
use crate::app::adapters::object_store::FsObjectStore;
use crate::app::services::data_update::DataUpdateProcessor;
use crate::cli::args::UpdateArgs;

/// Run the data-update pipeline for the configured source object
pub async fn run_update(args: UpdateArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet)?;

    let config = args.to_config();
    config.validate()?;

    info!(
        "Starting data update for '{}/{}' against {}",
        args.source_bucket, args.source_key, config.backend_base_url
    );

    let api = RecallsApiClient::new(&config);
    let store = FsObjectStore::new(&args.store_root);
    let processor = DataUpdateProcessor::new(api, store, config);

    let stats = processor.run(&args.source_bucket, &args.source_key).await?;

    println!("Data update succeeded: {}", stats.summary());
    Ok(())
}
