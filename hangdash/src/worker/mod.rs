//! Background date-graph worker
//!
//! Date graphs are rebuilt off the interactive thread. The worker owns a
//! request receiver and a response sender; nothing else is shared. Requests
//! are handled strictly one at a time, in arrival order.
//!
//! ```text
//! interactive ──WorkerRequest──► [request channel] ──► worker thread
//!      ▲                                                    │
//!      └──────────── [response channel] ◄──WorkerResponse───┘
//! ```
//!
//! Dropping the request side (see [`DateGraphWorker::shutdown`]) ends the loop.

pub mod messages;

use crate::analysis::build_date_graph;
use crate::domain::{WorkerError, WorkerInfo};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, info, warn};
use std::thread::JoinHandle;

pub use messages::{WorkerRequest, WorkerResponse};

/// Requests that may be queued before `send` blocks.
const REQUEST_QUEUE_DEPTH: usize = 64;

pub struct DateGraphWorker {
    request_tx: Sender<WorkerRequest>,
    response_rx: Receiver<WorkerResponse>,
    handle: JoinHandle<()>,
}

impl DateGraphWorker {
    /// Start the worker thread.
    ///
    /// # Errors
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (request_tx, request_rx) = bounded(REQUEST_QUEUE_DEPTH);
        let (response_tx, response_rx) = unbounded();
        let handle = std::thread::Builder::new()
            .name("date-graph".to_string())
            .spawn(move || run_worker(&request_rx, &response_tx))?;
        Ok(Self { request_tx, response_rx, handle })
    }

    /// # Errors
    /// Returns `Disconnected` if the worker thread has exited.
    pub fn send(&self, request: WorkerRequest) -> Result<(), WorkerError> {
        self.request_tx.send(request).map_err(|_| WorkerError::Disconnected)
    }

    /// Block until the next response arrives.
    ///
    /// # Errors
    /// Returns `Disconnected` if the worker exited without responding.
    pub fn recv(&self) -> Result<WorkerResponse, WorkerError> {
        self.response_rx.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Send a request and wait for its response.
    ///
    /// # Errors
    /// Returns `Disconnected` if the worker thread has exited.
    pub fn request(&self, request: WorkerRequest) -> Result<WorkerResponse, WorkerError> {
        self.send(request)?;
        self.recv()
    }

    /// Close the request channel and wait for the worker to finish.
    pub fn shutdown(self) {
        drop(self.request_tx);
        if self.handle.join().is_err() {
            warn!("Date graph worker panicked");
        }
    }
}

fn run_worker(requests: &Receiver<WorkerRequest>, responses: &Sender<WorkerResponse>) {
    let mut identity = WorkerInfo::default();
    info!("Date graph worker started");

    for request in requests {
        debug!("{identity} handling {}", request.command());
        let response = match request {
            WorkerRequest::RebuildDateGraph { thread, selected_stack } => {
                match build_date_graph(&thread, selected_stack) {
                    Ok(graph) => WorkerResponse::DateGraphRebuilt { selected_stack, graph },
                    Err(e) => WorkerResponse::DateGraphFailed(e),
                }
            }
            WorkerRequest::SetWorkerInformation { worker_index, num_workers } => {
                identity = WorkerInfo { worker_index, num_workers };
                WorkerResponse::WorkerInformationSet(identity)
            }
        };
        if responses.send(response).is_err() {
            debug!("Response channel closed, stopping");
            break;
        }
    }

    info!("Date graph worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StackSelection;
    use crate::domain::{DayId, GraphError};
    use crate::profile::{DayTable, SampleTable, StackTable, Thread};
    use std::sync::Arc;

    fn thread() -> Arc<Thread> {
        Arc::new(Thread {
            name: None,
            stack_table: StackTable { prefix: vec![None, Some(0)], func: vec![0, 1], depth: vec![0, 1] },
            sample_table: SampleTable {
                length: 2,
                stack: vec![Some(0), Some(1)],
                sample_hang_ms: vec![3.0, 4.0],
                sample_hang_count: vec![1.0, 2.0],
            },
            dates: vec![DayTable {
                date: DayId(1),
                sample_hang_ms: vec![3.0, 4.0],
                sample_hang_count: vec![1.0, 2.0],
            }],
            string_table: Default::default(),
        })
    }

    #[test]
    fn test_rebuild_date_graph() {
        let worker = DateGraphWorker::spawn().unwrap();
        let response = worker
            .request(WorkerRequest::RebuildDateGraph { thread: thread(), selected_stack: StackSelection::Stack(1) })
            .unwrap();
        match response {
            WorkerResponse::DateGraphRebuilt { selected_stack, graph } => {
                assert_eq!(selected_stack, StackSelection::Stack(1));
                assert_eq!(graph.total_time, vec![4.0]);
                assert_eq!(graph.total_count, vec![2.0]);
            }
            other => panic!("unexpected response {other:?}"),
        }
        worker.shutdown();
    }

    #[test]
    fn test_invalid_selection_is_reported() {
        let worker = DateGraphWorker::spawn().unwrap();
        let response = worker
            .request(WorkerRequest::RebuildDateGraph { thread: thread(), selected_stack: StackSelection::Stack(9) })
            .unwrap();
        assert_eq!(
            response,
            WorkerResponse::DateGraphFailed(GraphError::InvalidSelection { stack: 9, stack_count: 2 })
        );
        worker.shutdown();
    }

    #[test]
    fn test_requests_answered_in_order() {
        let worker = DateGraphWorker::spawn().unwrap();
        worker.send(WorkerRequest::SetWorkerInformation { worker_index: 2, num_workers: 3 }).unwrap();
        worker
            .send(WorkerRequest::RebuildDateGraph { thread: thread(), selected_stack: StackSelection::All })
            .unwrap();

        assert_eq!(
            worker.recv().unwrap(),
            WorkerResponse::WorkerInformationSet(WorkerInfo { worker_index: 2, num_workers: 3 })
        );
        assert!(matches!(worker.recv().unwrap(), WorkerResponse::DateGraphRebuilt { .. }));
        worker.shutdown();
    }

    #[test]
    fn test_command_tags() {
        let request = WorkerRequest::SetWorkerInformation { worker_index: 0, num_workers: 1 };
        assert_eq!(request.command(), "SET_WORKER_INFORMATION");
    }
}
