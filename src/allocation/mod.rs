pub mod dates;
pub mod engine;
pub mod strategy;
pub mod types;

pub use engine::{allocate, allocate_with};
pub use strategy::{FirstAvailable, LeastLoaded, SelectionStrategy};
pub use types::{
    Allocation, AllocationEntry, AllocationError, PreferenceRecord, Worker, UNASSIGNED,
};
