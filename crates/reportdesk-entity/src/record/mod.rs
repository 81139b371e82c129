//! Record domain entities.

pub mod avatar;
pub mod dates;
pub mod model;

pub use avatar::{PLACEHOLDER_AVATAR_SVG, is_placeholder, placeholder_avatar_url};
pub use dates::{format_duration, parse_calendar_date};
pub use model::{CreateRecord, Record, RecordFields, ReplaceRecord};
