// src/state/request.rs
//! Background requests. Each action runs on its own worker thread and
//! reports back over a channel. Every request carries a ticket; only the
//! newest ticket of a lane may change what the user sees.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::{EvaluationReport, ResultSet};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    // Both single-text and file analyses write the result store
    Analysis,
    Evaluation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub lane: Lane,
    pub generation: u64,
    pub id: Uuid,
}

#[derive(Debug)]
pub enum Outcome {
    SingleText(Result<ResultSet>),
    File(Result<ResultSet>),
    Evaluation(Result<EvaluationReport>),
}

#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
    /// False when a newer request was issued on the same lane meanwhile.
    pub current: bool,
}

#[derive(Debug)]
pub struct Dispatcher {
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    next_generation: u64,
    latest: HashMap<Lane, u64>,
    pending: HashMap<Lane, u64>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            next_generation: 0,
            latest: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    fn issue(&mut self, lane: Lane) -> Ticket {
        self.next_generation += 1;
        let ticket = Ticket {
            lane,
            generation: self.next_generation,
            id: Uuid::new_v4(),
        };
        self.latest.insert(lane, ticket.generation);
        self.pending.insert(lane, ticket.generation);
        ticket
    }

    /// Runs `job` on a worker thread. `notify` fires once the outcome has
    /// been queued, typically to wake the UI.
    pub fn spawn<F, N>(&mut self, lane: Lane, job: F, notify: N) -> Ticket
    where
        F: FnOnce() -> Outcome + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let ticket = self.issue(lane);
        let sender = self.sender.clone();
        info!(request = %ticket.id, generation = ticket.generation, ?lane, "Request dispatched");

        thread::spawn(move || {
            let outcome = job();
            let completion = Completion {
                ticket,
                outcome,
                current: false,
            };
            if sender.send(completion).is_err() {
                debug!(request = %ticket.id, "Receiver gone, dropping completion");
            }
            notify();
        });

        ticket
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.lane) == Some(&ticket.generation)
    }

    /// Whether the newest request of `lane` is still running.
    pub fn in_flight(&self, lane: Lane) -> bool {
        self.pending.contains_key(&lane)
    }

    fn settle(&mut self, mut completion: Completion) -> Completion {
        completion.current = self.is_current(&completion.ticket);
        let ticket = completion.ticket;
        if completion.current {
            self.pending.remove(&ticket.lane);
            debug!(request = %ticket.id, generation = ticket.generation, "Request completed");
        } else {
            warn!(
                request = %ticket.id,
                generation = ticket.generation,
                latest = ?self.latest.get(&ticket.lane),
                "Discarding superseded response"
            );
        }
        completion
    }

    /// Everything that finished since the last call, in arrival order.
    pub fn drain(&mut self) -> Vec<Completion> {
        let arrived: Vec<Completion> = self.receiver.try_iter().collect();
        arrived.into_iter().map(|c| self.settle(c)).collect()
    }

    #[cfg(test)]
    pub fn wait_next(&mut self, timeout: std::time::Duration) -> Option<Completion> {
        let completion = self.receiver.recv_timeout(timeout).ok()?;
        Some(self.settle(completion))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ResultOrigin;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn empty_set() -> Result<ResultSet> {
        ResultSet::new(Vec::new(), ResultOrigin::SingleText)
    }

    #[test]
    fn single_request_completes_as_current() {
        let mut dispatcher = Dispatcher::new();
        let ticket = dispatcher.spawn(Lane::Analysis, || Outcome::SingleText(empty_set()), || {});
        assert!(dispatcher.in_flight(Lane::Analysis));

        let completion = dispatcher.wait_next(WAIT).unwrap();
        assert_eq!(completion.ticket, ticket);
        assert!(completion.current);
        assert!(!dispatcher.in_flight(Lane::Analysis));
    }

    #[test]
    fn older_response_arriving_last_is_stale() {
        let mut dispatcher = Dispatcher::new();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let slow = dispatcher.spawn(
            Lane::Analysis,
            move || {
                release_rx.recv().ok();
                Outcome::File(empty_set())
            },
            || {},
        );
        let fast = dispatcher.spawn(Lane::Analysis, || Outcome::SingleText(empty_set()), || {});

        let first = dispatcher.wait_next(WAIT).unwrap();
        assert_eq!(first.ticket, fast);
        assert!(first.current);

        release_tx.send(()).unwrap();
        let second = dispatcher.wait_next(WAIT).unwrap();
        assert_eq!(second.ticket, slow);
        assert!(!second.current);
    }

    #[test]
    fn lanes_do_not_supersede_each_other() {
        let mut dispatcher = Dispatcher::new();
        let analysis = dispatcher.spawn(Lane::Analysis, || Outcome::SingleText(empty_set()), || {});
        let evaluation = dispatcher.spawn(
            Lane::Evaluation,
            || Outcome::Evaluation(Ok(EvaluationReport {
                rows: 0,
                y_true: Vec::new(),
                y_pred: Vec::new(),
                f1: 1.0,
            })),
            || {},
        );

        assert!(dispatcher.is_current(&analysis));
        assert!(dispatcher.is_current(&evaluation));
        assert_ne!(analysis.generation, evaluation.generation);
    }

    #[test]
    fn notify_runs_after_completion_is_queued() {
        let mut dispatcher = Dispatcher::new();
        let (notified_tx, notified_rx) = mpsc::channel();
        dispatcher.spawn(
            Lane::Evaluation,
            || Outcome::SingleText(empty_set()),
            move || notified_tx.send(()).unwrap(),
        );

        notified_rx.recv_timeout(WAIT).unwrap();
        assert_eq!(dispatcher.drain().len(), 1);
    }
}
