//! HTTP-level tests against in-memory stores.

mod helpers;
mod media_test;
mod reports_test;
