pub use categorize::{UNCATEGORIZED, categorize};
pub use error::StoreError;
pub use export::export_csv;
pub use persist::{JsonFilePersistence, Persistence, default_state_path};
pub use store::ReceiptStore;

mod categorize;
mod error;
mod export;
mod persist;
mod seed;
pub mod stats;
mod store;

type ResultStore<T> = Result<T, StoreError>;
