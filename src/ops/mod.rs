pub mod samples;
pub mod stats;
pub mod store;
pub mod transfer;

pub use store::TodoStore;
