// MemberStore - membership list query engine over in-memory record collections

pub mod api;
pub mod collection;
pub mod config;
pub mod fetch;
pub mod models;
pub mod query;
pub mod record;
pub mod view;

// Re-export main types for convenience
pub use collection::Collection;
pub use config::Config;
pub use fetch::{FetchSequencer, FetchTicket, LoadState, apply_load};
pub use query::{QueryPage, QueryParams, StatusFilter};
pub use record::Record;
pub use view::{EditState, ListView};
