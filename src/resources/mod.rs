//! Per-resource operation handles borrowed from a [`Client`](crate::Client).

mod analysis;
mod devices;
mod files;
mod messages;
mod previews;
mod servers;
mod usage;

pub use analysis::Analysis;
pub use devices::Devices;
pub use files::{Files, PREVIEW_TIMEOUT_MS};
pub use messages::{GetOptions, ListOptions, Messages, SearchOptions};
pub use previews::Previews;
pub use servers::Servers;
pub use usage::Usage;
