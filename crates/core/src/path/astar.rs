//! The generic best-first search engine. Nothing in this file knows about
//! hexes; the node type is opaque and only needs equality and hashing. The
//! hex-specific entry points live on [PathQuery](crate::path::PathQuery).

use fnv::FnvBuildHasher;
use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap},
    hash::Hash,
};

/// The scoring of a node at the moment it was finalized: its exact
/// distance from the start, and its heuristic estimate to the goal. The
/// queue orders nodes by the sum of the two.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AStarKey {
    pub distance: usize,
    pub heuristic: usize,
}

/// Per-node search bookkeeping. A node is born Open; once Closed its
/// distance is final and never revised again.
struct NodeState {
    heuristic: usize,
    distance: usize,
    closed: bool,
}

/// A queue entry. The heap can't reach into `visited` to see a node's
/// current distance, so decrease-key is implemented by pushing a fresh
/// entry and letting the stale one rot: an entry whose recorded distance
/// no longer matches the node's state is skipped on pop.
struct HeapEntry<N> {
    rank: usize,
    distance: usize,
    node: N,
}

// Order entries so the smallest rank pops first out of std's max-heap.
// Node identity deliberately doesn't participate.
impl<N> Ord for HeapEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.distance.cmp(&self.distance))
    }
}

impl<N> PartialOrd for HeapEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> PartialEq for HeapEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for HeapEntry<N> {}

/// A streaming A* search. This is an iterator: each step pops the best
/// open node, closes it, and yields it with its final [AStarKey]. The
/// caller drives the search by pulling, and stops it by stopping, e.g.
/// breaking out on the first node inside a goal region. Expanding a
/// yielded node's neighbors is deferred until the *next* pull, so bailing
/// out never pays for an expansion the caller didn't want.
///
/// Edges that would push a node's distance past `max_distance` are
/// discarded outright, which is what bounds the search.
///
/// The search owns all of its state; nothing is shared across instances.
pub struct AStarSearch<'a, N, H, C, B>
where
    N: Clone + Eq + Hash,
    H: FnMut(&N) -> usize,
    C: FnMut(&N, &N) -> usize,
    B: FnMut(&N) -> Vec<N>,
{
    max_distance: usize,
    heuristic: H,
    cost: C,
    neighbors: B,
    /// Called whenever a better connection into a node is recorded. Not
    /// necessarily final: a later relaxation can re-parent the node.
    connected: Option<Box<dyn FnMut(&N, &N) + 'a>>,
    visited: HashMap<N, NodeState, FnvBuildHasher>,
    queue: BinaryHeap<HeapEntry<N>>,
    /// The node yielded last pull, still owed its expansion
    pending: Option<N>,
}

impl<'a, N, H, C, B> AStarSearch<'a, N, H, C, B>
where
    N: Clone + Eq + Hash,
    H: FnMut(&N) -> usize,
    C: FnMut(&N, &N) -> usize,
    B: FnMut(&N) -> Vec<N>,
{
    /// Set up a search from `start`. `heuristic` estimates remaining
    /// distance (must not overestimate for optimal paths), `cost` prices
    /// an edge between two adjacent nodes, and `neighbors` produces the
    /// candidate nodes reachable from a node, pre-filtered however the
    /// caller likes.
    pub fn new(
        start: N,
        max_distance: usize,
        mut heuristic: H,
        cost: C,
        neighbors: B,
    ) -> Self {
        let start_heuristic = heuristic(&start);
        let mut visited = HashMap::default();
        visited.insert(
            start.clone(),
            NodeState {
                heuristic: start_heuristic,
                distance: 0,
                closed: false,
            },
        );
        let mut queue = BinaryHeap::new();
        queue.push(HeapEntry {
            rank: start_heuristic,
            distance: 0,
            node: start,
        });
        Self {
            max_distance,
            heuristic,
            cost,
            neighbors,
            connected: None,
            visited,
            queue,
            pending: None,
        }
    }

    /// Observe edge relaxations, e.g. to record parent pointers for path
    /// reconstruction. The first argument is the "from" node.
    pub fn with_connected(
        mut self,
        callback: impl FnMut(&N, &N) + 'a,
    ) -> Self {
        self.connected = Some(Box::new(callback));
        self
    }

    /// Relax every edge out of a just-popped node.
    fn expand(&mut self, node: &N) {
        let from_distance = self
            .visited
            .get(node)
            .expect("expanded nodes always have state")
            .distance;

        for neighbor in (self.neighbors)(node) {
            let tentative =
                from_distance + (self.cost)(node, &neighbor);
            if tentative > self.max_distance {
                // Hard pruning: this edge doesn't exist for us
                continue;
            }

            if let Some(state) = self.visited.get_mut(&neighbor) {
                if state.closed {
                    // Its distance is already final
                    continue;
                }
                if tentative < state.distance {
                    // Decrease-key: record the better distance and push a
                    // replacement entry; the old one is now stale
                    state.distance = tentative;
                    self.queue.push(HeapEntry {
                        rank: tentative + state.heuristic,
                        distance: tentative,
                        node: neighbor.clone(),
                    });
                    if let Some(connected) = &mut self.connected {
                        connected(node, &neighbor);
                    }
                }
            } else {
                let heuristic = (self.heuristic)(&neighbor);
                self.visited.insert(
                    neighbor.clone(),
                    NodeState {
                        heuristic,
                        distance: tentative,
                        closed: false,
                    },
                );
                self.queue.push(HeapEntry {
                    rank: tentative + heuristic,
                    distance: tentative,
                    node: neighbor.clone(),
                });
                if let Some(connected) = &mut self.connected {
                    connected(node, &neighbor);
                }
            }
        }
    }
}

impl<'a, N, H, C, B> Iterator for AStarSearch<'a, N, H, C, B>
where
    N: Clone + Eq + Hash,
    H: FnMut(&N) -> usize,
    C: FnMut(&N, &N) -> usize,
    B: FnMut(&N) -> Vec<N>,
{
    type Item = (N, AStarKey);

    fn next(&mut self) -> Option<(N, AStarKey)> {
        // Pay the expansion debt from the previous step first
        if let Some(node) = self.pending.take() {
            self.expand(&node);
        }

        loop {
            let entry = self.queue.pop()?;
            let state = self
                .visited
                .get_mut(&entry.node)
                .expect("queued nodes always have state");
            // Skip anything stale: either the node was already finalized
            // through another entry, or this entry predates a decrease-key
            if state.closed || state.distance != entry.distance {
                continue;
            }
            state.closed = true;
            let key = AStarKey {
                distance: state.distance,
                heuristic: state.heuristic,
            };
            self.pending = Some(entry.node.clone());
            return Some((entry.node, key));
        }
    }
}
