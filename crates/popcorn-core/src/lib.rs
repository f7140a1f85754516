pub mod detail;
pub mod error;
pub mod exchange;
pub mod request;
pub mod search;
pub mod session;
pub mod store;
pub mod summary;
pub mod watched;

pub use detail::{detail_view_title, DetailState, NoopHooks, ViewHooks, DEFAULT_VIEW_TITLE};
pub use error::{SessionError, StoreError};
pub use exchange::{convert, ConversionError, ConversionRequest};
pub use request::{RequestSlot, RequestTicket};
pub use search::{short_query_message, SearchState, SearchView};
pub use session::{Applied, MovieSession, SessionEvent, SessionOptions};
pub use store::{FileKeyValueStore, KeyValueStore, PersistentList};
pub use summary::{average, WatchedSummary};
pub use watched::WatchedList;
