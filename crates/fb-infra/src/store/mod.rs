pub mod local_store;
pub mod paths;

pub use local_store::LocalStore;
