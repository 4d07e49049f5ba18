/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use std::collections::VecDeque;

/// A first-in-first-out queue of items.
pub trait ItemQueue<I> {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn push(&mut self, u: I);

    fn pop(&mut self) -> Option<I>;
}

impl<I> ItemQueue<I> for VecDeque<I> {
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self)
    }

    fn push(&mut self, u: I) {
        VecDeque::push_back(self, u)
    }

    fn pop(&mut self) -> Option<I> {
        VecDeque::pop_front(self)
    }
}

/// A FIFO queue of nodes `0..n` in which each node appears at most once.
///
/// A node is *active* while it is contained in the queue. Nodes may also
/// be marked active without being queued; such nodes are never inserted
/// (the push-relabel algorithm uses this for the source and the sink).
///
/// # Example
///
/// ```
/// use preflow::collections::{ActiveQueue, ItemQueue};
///
/// let mut q = ActiveQueue::new(4);
/// q.mark(0);
/// q.push(2);
/// q.push(0);
/// q.push(1);
/// q.push(2);
///
/// assert_eq!(q.len(), 2);
/// assert_eq!(q.pop(), Some(2));
/// assert!(!q.is_active(2));
/// assert_eq!(q.pop(), Some(1));
/// assert_eq!(q.pop(), None);
/// assert!(q.is_active(0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ActiveQueue {
    queue: VecDeque<usize>,
    active: Vec<bool>,
}

impl ActiveQueue {
    /// Return an empty queue for the nodes `0..n`.
    pub fn new(n: usize) -> Self {
        ActiveQueue {
            queue: VecDeque::with_capacity(n),
            active: vec![false; n],
        }
    }

    /// Empty the queue and resize it for the nodes `0..n`.
    ///
    /// All nodes become inactive.
    pub fn reset(&mut self, n: usize) {
        self.queue.clear();
        self.active.clear();
        self.active.resize(n, false);
    }

    /// Return `true` if `u` is in the queue or has been marked.
    pub fn is_active(&self, u: usize) -> bool {
        self.active[u]
    }

    /// Mark `u` as active without adding it to the queue.
    ///
    /// The node will be ignored by all subsequent calls to `push`.
    pub fn mark(&mut self, u: usize) {
        self.active[u] = true;
    }
}

impl ItemQueue<usize> for ActiveQueue {
    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        while let Some(u) = self.queue.pop_front() {
            self.active[u] = false;
        }
    }

    /// Append `u` unless it is already active.
    fn push(&mut self, u: usize) {
        if !self.active[u] {
            self.active[u] = true;
            self.queue.push_back(u);
        }
    }

    /// Remove the first node, it becomes inactive.
    fn pop(&mut self) -> Option<usize> {
        let u = self.queue.pop_front()?;
        self.active[u] = false;
        Some(u)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveQueue, ItemQueue};
    use std::collections::VecDeque;

    #[test]
    fn test_fifo_order() {
        let mut q = ActiveQueue::new(5);
        for &u in &[3, 1, 4, 1, 0, 3] {
            q.push(u);
        }
        let mut order = vec![];
        while let Some(u) = q.pop() {
            order.push(u);
        }
        assert_eq!(order, vec![3, 1, 4, 0]);
        assert!((0..5).all(|u| !q.is_active(u)));
    }

    #[test]
    fn test_requeue_after_pop() {
        let mut q = ActiveQueue::new(2);
        q.push(1);
        assert_eq!(q.pop(), Some(1));
        q.push(1);
        assert_eq!(q.len(), 1);
        q.clear();
        assert!(q.is_empty());
        assert!(!q.is_active(1));
    }

    #[test]
    fn test_vecdeque() {
        let mut q = VecDeque::new();
        ItemQueue::push(&mut q, 1);
        ItemQueue::push(&mut q, 2);
        assert_eq!(ItemQueue::pop(&mut q), Some(1));
        assert_eq!(ItemQueue::len(&q), 1);
    }
}
