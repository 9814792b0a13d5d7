pub mod assignment;
pub mod bulk;
pub mod capacity;
pub mod position_service;

pub use bulk::BulkSubmitter;
pub use capacity::BatchCapacity;
pub use position_service::PositionService;
