mod record;
mod store;

pub use record::RecordError;
pub use store::{
    Completion, Loaded, Rejected, RecordKind, Store, StoreLoadError, StoreWriteError, Unloaded,
};
