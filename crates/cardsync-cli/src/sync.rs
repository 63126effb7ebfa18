//! The sync driver.
//!
//! One cycle checks the record store, finds the target list on the board and
//! turns every card in it into a destination record. Cycles repeat on a fixed
//! interval. Nothing is remembered between cycles, so a card still in the
//! list is submitted again on every pass.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use cardsync_client::{BoardApi, BoardList, Card, ClientError, RecordStoreApi, find_list};
use cardsync_model::{DestinationRecord, ExtractedFields, SyncConfig, columns};
use cardsync_normalization::{build_record, extract_fields};
use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};

/// Per-run switches layered over the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Build and log records without submitting them.
    pub dry_run: bool,
    /// Log the destination table's columns at the start of every cycle.
    pub inspect_schema: bool,
    /// Pause between cycles.
    pub interval: Duration,
}

impl SyncOptions {
    /// Options as the configuration file sets them.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            dry_run: false,
            inspect_schema: config.sync.inspect_schema,
            interval: config.sync.interval(),
        }
    }
}

/// Reasons a whole cycle is abandoned.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("record store unreachable: {0}")]
    StoreUnreachable(ClientError),

    #[error("board request failed: {0}")]
    Board(ClientError),

    #[error("board {0} has no lists")]
    NoLists(String),

    #[error("list '{0}' not found on the board")]
    TargetListMissing(String),
}

/// What happened to one card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    Submitted { record_id: String },
    DryRun,
    Failed(String),
}

/// One card's result within a cycle.
#[derive(Debug, Clone)]
pub struct CardResult {
    pub card_id: String,
    pub card_name: String,
    /// Custom field values read from the card.
    pub fields_read: usize,
    /// The record that was (or would have been) submitted.
    pub record: Option<DestinationRecord>,
    pub outcome: CardOutcome,
}

impl CardResult {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, CardOutcome::Failed(_))
    }
}

/// Tally of one completed cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub list_id: String,
    pub list_name: String,
    pub dry_run: bool,
    pub cards: Vec<CardResult>,
}

impl CycleReport {
    /// Cards that were submitted, or built in dry-run mode.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_failure()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.cards.iter().filter(|card| card.is_failure()).count()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Totals across every cycle of a [`SyncDriver::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub cycles: u64,
    pub aborted: u64,
    pub succeeded: usize,
    pub failed: usize,
}

/// Source of the "Month Reporting" date, read once per card.
type Clock<'a> = Box<dyn Fn() -> NaiveDate + 'a>;

/// Drives cycles against a board and a record store.
pub struct SyncDriver<'a, B, S> {
    config: &'a SyncConfig,
    board: B,
    store: S,
    options: SyncOptions,
    today: Clock<'a>,
}

impl<'a, B: BoardApi, S: RecordStoreApi> SyncDriver<'a, B, S> {
    pub fn new(config: &'a SyncConfig, board: B, store: S, options: SyncOptions) -> Self {
        Self {
            config,
            board,
            store,
            options,
            today: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the local-date clock used to stamp records.
    #[must_use]
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + 'a) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Run cycles until `max_cycles` have completed, or forever with `None`.
    ///
    /// A failed or panicking cycle is logged and the loop carries on.
    pub fn run(&self, max_cycles: Option<u64>) -> RunTotals {
        let mut totals = RunTotals::default();
        info!(
            interval_secs = self.options.interval.as_secs(),
            dry_run = self.options.dry_run,
            "starting sync loop"
        );
        loop {
            totals.cycles += 1;
            let span = info_span!("cycle", number = totals.cycles);
            let outcome =
                span.in_scope(|| panic::catch_unwind(AssertUnwindSafe(|| self.run_cycle())));
            match outcome {
                Ok(Ok(report)) => {
                    totals.succeeded += report.succeeded();
                    totals.failed += report.failed();
                }
                Ok(Err(error)) => {
                    totals.aborted += 1;
                    span.in_scope(|| error!(%error, "cycle aborted"));
                }
                Err(panic) => {
                    totals.aborted += 1;
                    let message = panic_message(panic.as_ref());
                    span.in_scope(|| error!(panic = message, "cycle panicked"));
                }
            }
            if max_cycles.is_some_and(|max| totals.cycles >= max) {
                break;
            }
            debug!(
                seconds = self.options.interval.as_secs(),
                "waiting for next cycle"
            );
            thread::sleep(self.options.interval);
        }
        totals
    }

    /// Run one full pass over the target list.
    pub fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let started_at = Local::now();
        info!("starting sync cycle");

        self.store.probe().map_err(CycleError::StoreUnreachable)?;
        debug!("record store reachable");
        if self.options.inspect_schema {
            self.log_schema();
        }

        let board_id = &self.config.board.board_id;
        let lists = self.board.lists(board_id).map_err(CycleError::Board)?;
        if lists.is_empty() {
            return Err(CycleError::NoLists(board_id.clone()));
        }
        log_lists(&lists);

        let target = &self.config.board.target_list;
        let list = find_list(&lists, target)
            .ok_or_else(|| CycleError::TargetListMissing(target.clone()))?;
        info!(list = %list.name, list_id = %list.id, "found target list");

        let cards = self.board.cards(&list.id).map_err(CycleError::Board)?;
        info!(count = cards.len(), "fetched cards");

        let results: Vec<CardResult> = cards.iter().map(|card| self.process_card(card)).collect();

        let report = CycleReport {
            started_at,
            finished_at: Local::now(),
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            dry_run: self.options.dry_run,
            cards: results,
        };
        info!(
            cards = report.cards.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "sync cycle complete"
        );
        Ok(report)
    }

    fn process_card(&self, card: &Card) -> CardResult {
        let span = info_span!("card", card_id = %card.id, name = %card.display_name());
        let _enter = span.enter();

        let mut result = CardResult {
            card_id: card.id.clone(),
            card_name: card.display_name().to_string(),
            fields_read: 0,
            record: None,
            outcome: CardOutcome::DryRun,
        };

        let items = match self.board.card_field_items(&card.id) {
            Ok(items) => items,
            Err(error) => {
                warn!(%error, "failed to fetch custom fields");
                result.outcome = CardOutcome::Failed(error.to_string());
                return result;
            }
        };
        let fields = extract_fields(&items);
        result.fields_read = fields.len();
        self.log_fields(&fields);

        let today = (self.today)();
        let record = build_record(&card.name, &fields, &self.config.fields, today);
        if self.options.dry_run {
            info!(record = %payload(&record), "dry run, record not submitted");
        } else {
            result.outcome = match self.store.create_record(&record) {
                Ok(created) => {
                    info!(record_id = %created.id, "record created");
                    CardOutcome::Submitted {
                        record_id: created.id,
                    }
                }
                Err(error) => {
                    error!(%error, record = %payload(&record), "record rejected");
                    CardOutcome::Failed(error.to_string())
                }
            };
        }
        result.record = Some(record);
        result
    }

    fn log_fields(&self, fields: &ExtractedFields) {
        for (field_id, value) in fields.iter() {
            match self.config.fields.name_for(field_id) {
                Some(name) => debug!(field = name, field_id, value, "custom field"),
                None => debug!(field_id, value, "unmapped custom field"),
            }
        }
    }

    fn log_schema(&self) {
        let table = match self.store.table_schema() {
            Ok(table) => table,
            Err(error) => {
                warn!(%error, "could not inspect destination schema");
                return;
            }
        };
        info!(table = %table.name, columns = table.fields.len(), "destination schema");
        for column in &table.fields {
            debug!(column = %column.name, column_type = %column.column_type, "destination column");
        }
        for expected in columns::ALL {
            if table.column(expected).is_none() {
                warn!(column = expected, "destination table is missing a column");
            }
        }
    }
}

fn log_lists(lists: &[BoardList]) {
    for list in lists {
        debug!(list = %list.name, list_id = %list.id, closed = list.closed, "board list");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

fn payload(record: &DestinationRecord) -> String {
    serde_json::to_string(record).unwrap_or_else(|error| format!("<unserializable: {error}>"))
}
