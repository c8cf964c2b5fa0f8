//! Messages between the interactive side and the date-graph worker
//!
//! These enums are the only coupling between the two contexts: each request
//! carries everything the worker needs, and each response carries the result.

use crate::analysis::{DateGraph, StackSelection};
use crate::domain::{GraphError, WorkerInfo};
use crate::profile::Thread;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum WorkerRequest {
    /// Recompute the date graph for a thread and selected stack.
    RebuildDateGraph { thread: Arc<Thread>, selected_stack: StackSelection },
    /// Tell the worker where it sits among its peers.
    SetWorkerInformation { worker_index: usize, num_workers: usize },
}

impl WorkerRequest {
    pub fn command(&self) -> &'static str {
        match self {
            WorkerRequest::RebuildDateGraph { .. } => "REBUILD_DATE_GRAPH",
            WorkerRequest::SetWorkerInformation { .. } => "SET_WORKER_INFORMATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    DateGraphRebuilt { selected_stack: StackSelection, graph: DateGraph },
    DateGraphFailed(GraphError),
    WorkerInformationSet(WorkerInfo),
}
