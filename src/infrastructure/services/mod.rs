//! Application services

mod allocation_service;

pub use allocation_service::AllocationService;
