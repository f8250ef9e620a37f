//! Breadth-first traversal over hex coordinates.
//!
//! The traversal is iterative (explicit queue plus visited set) so that
//! flood fills over large maps never grow the call stack.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::coord::AxialCoord;

/// Visits coordinates breadth-first from `start`.
///
/// `neighbors` yields the candidates reachable from a coordinate. `stop` is
/// called with each visited coordinate and its depth; when it returns true the
/// coordinate is still part of the result but is not expanded. A coordinate is
/// queued at most once. Results are in visit order, `start` first.
pub fn breadth_first<N, I, S>(start: AxialCoord, mut neighbors: N, mut stop: S) -> Vec<AxialCoord>
where
    N: FnMut(AxialCoord) -> I,
    I: IntoIterator<Item = AxialCoord>,
    S: FnMut(AxialCoord, u32) -> bool,
{
    let mut visited = HashSet::from([start]);
    let mut frontier = VecDeque::from([(start, 0u32)]);
    let mut order = Vec::new();

    while let Some((coord, depth)) = frontier.pop_front() {
        order.push(coord);
        if stop(coord, depth) {
            continue;
        }
        for next in neighbors(coord) {
            if visited.insert(next) {
                frontier.push_back((next, depth + 1));
            }
        }
    }

    order
}

/// Collects the connected region containing `seed` under the `member`
/// predicate. `seed` itself is always included.
pub fn flood_fill<F>(seed: AxialCoord, member: F) -> BTreeSet<AxialCoord>
where
    F: Fn(AxialCoord) -> bool,
{
    let member = &member;
    breadth_first(
        seed,
        move |coord| coord.neighbors().filter(move |n| member(*n)),
        |_, _| false,
    )
    .into_iter()
    .collect()
}
