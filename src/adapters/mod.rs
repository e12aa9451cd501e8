// Adapters layer: concrete implementations of the domain ports (http, storage, filesystem inventory).

pub mod http;
pub mod inventory;
pub mod storage;

pub use http::HttpCurveSource;
pub use inventory::DirectoryInventory;
pub use storage::LocalStorage;
