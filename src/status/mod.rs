// src/status/mod.rs

//! Backend data model and the status resolver.

pub mod model;
pub mod resolver;

pub use model::{
    Download, Group, GroupStatistics, MessageResponse, ResourceState, ResourceStatus,
    RunTasksResponse, Statistics, Task,
};
pub use resolver::{combined_priority, priority, resolve, Badge, ResolvedStatus};
