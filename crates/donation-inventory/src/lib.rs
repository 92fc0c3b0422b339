//! `donation-inventory` - Record, edit, filter and summarize donations
//!
//! This library provides the donation store with its pluggable persistence
//! slot, the read-only views derived from the donation list, and the add/edit
//! form that validates input before it reaches the store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod donation;
pub mod error;
pub mod form;
pub mod logging;
pub mod storage;
pub mod store;
pub mod views;

pub use config::Config;
pub use donation::{DonationRecord, DonationType, NewDonation};
pub use error::{Error, Result};
pub use form::{DonationForm, FormAction, FormField, FormMode, ValidationError};
pub use logging::init_logging;
pub use storage::{MemoryBackend, SlotBackend, SqliteBackend};
pub use store::DonationStore;
pub use views::{filter_by_type, statistics, summarize, Statistics, Summary, TypeFilter};
