//! Deferred work for the cooperative scheduling model.
//!
//! Flushes are not run when an element is dirtied but queued here, and the
//! queue is drained at the next checkpoint ([`crate::Document::run_microtasks`]).
//! Tasks scheduled while draining run in the same checkpoint, after the
//! tasks already queued. A task put back by the document while one of its
//! descendants is pending is just scheduled again.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct MicrotaskQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for MicrotaskQueue<T> {
    fn default() -> Self {
        Self { tasks: VecDeque::new() }
    }
}

impl<T> MicrotaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Takes the oldest pending task.
    pub fn pop(&mut self) -> Option<T> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_in_schedule_order() {
        let mut queue = MicrotaskQueue::new();
        queue.schedule(1);
        queue.schedule(2);
        assert_eq!(queue.pop(), Some(1));
        queue.schedule(3);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert!(queue.is_empty());
    }
}
