use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use cardsync_cli::config::load_config;
use cardsync_cli::sync::{CycleError, CycleReport, SyncDriver, SyncOptions};
use cardsync_client::{BoardClient, ClientError, RecordStoreApi, StoreClient};
use cardsync_model::columns;
use cardsync_normalization::column_sources;
use tracing::{info, info_span};

use crate::cli::RunArgs;
use crate::summary::{ColumnCoverage, print_field_definitions, print_table_schema};

/// Run the sync. Returns the report when `--once` was given; otherwise the
/// loop only ends with the process.
pub fn run_sync(config_path: &Path, args: &RunArgs) -> Result<Option<CycleReport>> {
    let config = load_config(config_path)?;
    let board = BoardClient::new(&config.board).map_err(with_hint)?;
    let store = StoreClient::new(&config.store).map_err(with_hint)?;

    let mut options = SyncOptions::from_config(&config);
    options.dry_run = args.dry_run;
    options.inspect_schema &= !args.no_schema_check;
    if let Some(seconds) = args.interval {
        options.interval = Duration::from_secs(seconds);
    }

    let driver = SyncDriver::new(&config, board, store, options);
    if args.once {
        let span = info_span!("cycle", number = 1);
        let _enter = span.enter();
        let report = driver.run_cycle().map_err(|error| match &error {
            CycleError::StoreUnreachable(source) | CycleError::Board(source) => {
                anyhow!("{error}\nhint: {}", source.user_message())
            }
            _ => anyhow!(error),
        })?;
        return Ok(Some(report));
    }

    let totals = driver.run(None);
    info!(
        cycles = totals.cycles,
        aborted = totals.aborted,
        succeeded = totals.succeeded,
        failed = totals.failed,
        "sync loop stopped"
    );
    Ok(None)
}

pub fn run_fields(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let board = BoardClient::new(&config.board).map_err(with_hint)?;
    let definitions = board
        .custom_fields(&config.board.board_id)
        .map_err(with_hint)
        .with_context(|| format!("fetch custom fields of board {}", config.board.board_id))?;
    print_field_definitions(&definitions, &config.fields);
    Ok(())
}

pub fn run_schema(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let store = StoreClient::new(&config.store).map_err(with_hint)?;
    let table = store
        .table_schema()
        .map_err(with_hint)
        .with_context(|| format!("fetch schema of table {}", config.store.table))?;

    let always = [columns::MONTH_REPORTING, columns::SITE_NAME]
        .into_iter()
        .map(|column| (column, true));
    let mapped =
        column_sources().map(|(name, column)| (column, config.fields.id_for(name).is_some()));
    let coverage: Vec<ColumnCoverage> = always
        .chain(mapped)
        .map(|(column, written)| ColumnCoverage {
            column,
            present: table.column(column).is_some(),
            written,
        })
        .collect();
    print_table_schema(&table, &coverage);
    Ok(())
}

fn with_hint(error: ClientError) -> anyhow::Error {
    anyhow!("{error}\nhint: {}", error.user_message())
}
