//! This module implements a best-first search in the style of [pathfinding's astar
//! function][astar] in which successor generation also receives the parent of the expanded node,
//! which is what Jump Point Search needs to prune by direction of travel. A*, the nearest-goal
//! Dijkstra search and the cost-only queries all run through it.
//!
//! [astar]: https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use num_traits::Zero;
use std::hash::Hash;

use crate::frontier::{FrontierEntry, PriorityFrontier};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Runs a best-first search from `start` until `success` accepts a popped node.
///
/// Nodes are ordered by `cost + heuristic(node)`. Each node is expanded at most once (a closed
/// set guards re-expansion) and entries made stale by a cheaper push are skipped on pop. Returns
/// the node sequence from `start` to the accepted node together with its accumulated cost, or
/// [None] once the frontier is exhausted.
pub fn best_first_search<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(Option<&N>, &N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = PriorityFrontier::new();
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    let mut closed: FxHashSet<usize> = FxHashSet::default();
    to_see.push(0, heuristic(start), Zero::zero());
    parents.insert(start.clone(), (NO_PARENT, Zero::zero()));
    while let Some(FrontierEntry { index, cost, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(parent_index, best))) = parents.get_index(index) else {
                continue;
            };
            // A cheaper entry for this node was pushed after this one.
            if cost > best {
                continue;
            }
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            if !closed.insert(index) {
                continue;
            }
            let parent_node = parents.get_index(parent_index).map(|x| x.0);
            successors(parent_node, node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if closed.contains(&e.index()) || !(new_cost < e.get().1) {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
            }
            to_see.push(n, new_cost + h, new_cost);
        }
    }
    trace!(
        "Frontier exhausted after expanding {} of {} discovered nodes",
        closed.len(),
        parents.len()
    );
    None
}
