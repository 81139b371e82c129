//! The report list: ordering, load/edit/delete, and the shared snapshot.

pub mod controller;
pub mod session;
pub mod sort;
pub mod state;

pub use controller::ReportListController;
pub use session::ReportSession;
pub use sort::sort_records;
pub use state::{EditNotice, ListPhase, ReportListState};
