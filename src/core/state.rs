use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

use crate::sim::ProcessSpec;

pub type Ticks = u64;
new_key_type! {
    pub struct ProcessId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    NotArrived,
    Ready,
    Running,
    Completed,
}

#[derive(Debug)]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    // Position in the input workload; final tie-break for every policy
    pub order: usize,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub status: ProcessStatus,
    pub remaining: Ticks,
    pub wait: Ticks,
    pub completion_time: Option<Ticks>,
    pub last_ran_at: Option<Ticks>,
    pub selected_at: Option<Ticks>,
}

impl Process {
    /// Ready or running with burst left to execute.
    pub fn is_schedulable(&self) -> bool {
        matches!(self.status, ProcessStatus::Ready | ProcessStatus::Running) && self.remaining > 0
    }

    pub fn executed(&self) -> Ticks {
        self.burst - self.remaining
    }
}

/// Selection rank inside the ready set. Lower `key` wins, then lower `order`.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank {
    pub key: u64,
    pub order: usize,
}

impl Rank {
    pub fn new(key: u64, order: usize) -> Self {
        Self { key, order }
    }
}

// KeyedPriorityQueue is a max-heap, so the smallest (key, order) must compare greatest
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.key, other.order).cmp(&(self.key, self.order))
    }
}

/// Processes that have arrived and not yet completed.
#[derive(Debug)]
pub struct ReadySet {
    queue: KeyedPriorityQueue<ProcessId, Rank>,
}

impl ReadySet {
    pub fn new() -> Self {
        Self {
            queue: KeyedPriorityQueue::new(),
        }
    }

    pub fn insert(&mut self, id: ProcessId, rank: Rank) {
        let previous = self.queue.push(id, rank);
        debug_assert!(previous.is_none(), "Process {id:?} already in the ready set");
    }

    pub fn remove(&mut self, id: ProcessId) -> bool {
        self.queue.remove(&id).is_some()
    }

    pub fn rerank(&mut self, id: ProcessId, rank: Rank) {
        let updated = self.queue.set_priority(&id, rank);
        debug_assert!(updated.is_ok(), "Reranked process {id:?} missing from ready set");
    }

    /// Best-ranked ready process, if any.
    pub fn first(&self) -> Option<ProcessId> {
        self.queue.peek().map(|(id, _)| *id)
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.queue.get_priority(&id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.queue.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Mutable simulation state owned by one engine for the duration of a run.
#[derive(Debug)]
pub struct Workload {
    pub now: Ticks,
    pub processes: SlotMap<ProcessId, Process>,
    pub ready: ReadySet,
    pub selected: Option<ProcessId>,

    // Input order
    by_order: Vec<ProcessId>,
    // Not yet arrived, sorted by (arrival, order)
    pending: VecDeque<ProcessId>,
    names: FxHashMap<String, ProcessId>,
}

impl Workload {
    pub fn new(specs: &[ProcessSpec]) -> Self {
        let mut processes = SlotMap::with_capacity_and_key(specs.len());
        let mut by_order = Vec::with_capacity(specs.len());
        let mut names = FxHashMap::default();

        for (order, spec) in specs.iter().enumerate() {
            let id = processes.insert_with_key(|id| Process {
                id,
                name: spec.name.clone(),
                order,
                arrival: spec.arrival,
                burst: spec.burst,
                status: ProcessStatus::NotArrived,
                remaining: spec.burst,
                wait: 0,
                completion_time: None,
                last_ran_at: None,
                selected_at: None,
            });
            by_order.push(id);
            names.insert(spec.name.clone(), id);
        }

        let mut pending = by_order.clone();
        pending.sort_by_key(|&id| (processes[id].arrival, processes[id].order));

        Self {
            now: 0,
            processes,
            ready: ReadySet::new(),
            selected: None,
            by_order,
            pending: pending.into(),
            names,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id]
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[id]
    }

    pub fn find(&self, name: &str) -> Option<&Process> {
        self.names.get(name).map(|&id| &self.processes[id])
    }

    /// Processes in input order.
    pub fn in_order(&self) -> impl Iterator<Item = &Process> + '_ {
        self.by_order.iter().map(|&id| &self.processes[id])
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Nothing left to arrive and nothing left to run.
    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty()
    }

    /// Pops the next pending process if it has arrived by `now`.
    pub fn pop_arrival(&mut self, now: Ticks) -> Option<ProcessId> {
        let &next = self.pending.front()?;
        if self.processes[next].arrival > now {
            return None;
        }
        self.pending.pop_front()
    }

    /// Ready processes whose burst is exhausted, in input order.
    pub fn exhausted(&self) -> Vec<ProcessId> {
        let mut done: Vec<ProcessId> = self
            .ready
            .ids()
            .filter(|&id| self.processes[id].remaining == 0)
            .collect();
        done.sort_by_key(|&id| self.processes[id].order);
        done
    }

    pub fn mark_ready(&mut self, id: ProcessId, rank: Rank) {
        let process = self.process_mut(id);
        debug_assert!(
            process.status == ProcessStatus::NotArrived,
            "Process {} admitted twice",
            process.name
        );
        process.status = ProcessStatus::Ready;
        self.ready.insert(id, rank);
    }

    pub fn mark_completed(&mut self, id: ProcessId, completion_time: Ticks) {
        let removed = self.ready.remove(id);
        debug_assert!(removed, "Completing process {id:?} that is not ready");

        let process = &mut self.processes[id];
        debug_assert_eq!(process.remaining, 0, "Process {} completed early", process.name);
        process.status = ProcessStatus::Completed;
        process.completion_time = Some(completion_time);

        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    // Swap the running process; returns whether the selection changed
    pub fn set_running(&mut self, next: Option<ProcessId>) -> bool {
        if self.selected == next {
            return false;
        }

        if let Some(prev) = self.selected {
            let process = self.process_mut(prev);
            if process.status == ProcessStatus::Running {
                process.status = ProcessStatus::Ready;
            }
        }

        if let Some(id) = next {
            let now = self.now;
            let process = self.process_mut(id);
            debug_assert!(
                process.is_schedulable(),
                "Process {} selected without burst left",
                process.name
            );
            process.status = ProcessStatus::Running;
            process.selected_at = Some(now);
        }

        self.selected = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, arrival: Ticks, burst: Ticks) -> ProcessSpec {
        ProcessSpec::new(name, arrival, burst)
    }

    #[test]
    fn rank_prefers_smaller_key_then_order() {
        let mut ready = KeyedPriorityQueue::new();
        ready.push("late", Rank::new(5, 0));
        ready.push("early_second", Rank::new(2, 1));
        ready.push("early_first", Rank::new(2, 0));

        assert_eq!(ready.pop().map(|(k, _)| k), Some("early_first"));
        assert_eq!(ready.pop().map(|(k, _)| k), Some("early_second"));
        assert_eq!(ready.pop().map(|(k, _)| k), Some("late"));
    }

    #[test]
    fn arrivals_pop_in_arrival_then_input_order() {
        let mut ctx = Workload::new(&[spec("A", 3, 1), spec("B", 0, 1), spec("C", 3, 1)]);

        assert_eq!(ctx.pop_arrival(0).map(|id| ctx.process(id).name.clone()), Some("B".into()));
        assert_eq!(ctx.pop_arrival(2), None);

        let arrived: Vec<ProcessId> = std::iter::from_fn(|| ctx.pop_arrival(3)).collect();
        let names: Vec<&str> = arrived.iter().map(|&id| ctx.process(id).name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert!(!ctx.has_pending());
    }

    #[test]
    fn completion_clears_selection() {
        let mut ctx = Workload::new(&[spec("A", 0, 1)]);
        let id = ctx.pop_arrival(0).unwrap();
        ctx.mark_ready(id, Rank::new(0, 0));
        assert!(ctx.set_running(Some(id)));
        assert!(!ctx.set_running(Some(id)));

        ctx.process_mut(id).remaining = 0;
        assert_eq!(ctx.exhausted(), vec![id]);
        ctx.mark_completed(id, 1);

        assert_eq!(ctx.selected, None);
        assert_eq!(ctx.process(id).status, ProcessStatus::Completed);
        assert_eq!(ctx.process(id).completion_time, Some(1));
        assert!(ctx.is_drained());
    }

    #[test]
    fn find_by_name() {
        let ctx = Workload::new(&[spec("A", 0, 2), spec("B", 1, 3)]);
        assert_eq!(ctx.find("B").map(|p| p.burst), Some(3));
        assert!(ctx.find("Z").is_none());
        let order: Vec<&str> = ctx.in_order().map(|p| p.name.as_str()).collect();
        assert_eq!(order, ["A", "B"]);
    }
}
