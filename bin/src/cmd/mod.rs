//! CLI subcommand modules.
//!
//! This module contains the implementations for all barometer CLI subcommands.

pub(crate) mod components;
pub(crate) mod migrate;
pub(crate) mod status;
pub(crate) mod update;

use barometer::store::FIELD_NAMES;
use barometer::{HistoryRecord, IndexKind};

/// Print one record, composites first.
pub(crate) fn print_record(record: &HistoryRecord) {
    println!("Date: {}", record.date());
    println!("{}", "-".repeat(40));
    for (i, field) in FIELD_NAMES.iter().enumerate() {
        if i == IndexKind::ALL.len() {
            println!();
        }
        match record.get(field) {
            Some(value) => println!("  {field:20} {value:>12.4}"),
            None => println!("  {field:20} {:>12}", "-"),
        }
    }
    println!();
}
