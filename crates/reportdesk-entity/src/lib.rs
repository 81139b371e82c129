//! # reportdesk-entity
//!
//! Domain entity models for ReportDesk. The record is the only entity;
//! this crate holds its stored shape, the editable field set, the
//! create/replace payloads handed to record stores, and the two derived
//! values computed client-side (the frozen duration string and the
//! placeholder avatar).

pub mod record;

pub use record::{CreateRecord, Record, RecordFields, ReplaceRecord};
