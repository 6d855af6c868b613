use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use tracing::trace;

use crate::components::{Dir, Pos};
use crate::level::Grid;

/// First direction of a shortest walk from `start` to `target`.
///
/// Neighbors are expanded Up, Right, Down, Left, so among equally short
/// paths the one found first in that order wins. With a `heading`, the
/// reverse of it is never expanded from `start` itself; deeper nodes may
/// turn freely. A target inside a wall counts as reached from any open
/// cell next to it.
///
/// Standing on the target keeps the current heading when possible. When
/// the target cannot be reached, a random non-reversing open direction is
/// drawn from `rng`.
pub fn first_step(
    grid: &Grid,
    start: Pos,
    target: Pos,
    heading: Option<Dir>,
    rng: &mut impl Rng,
) -> Dir {
    let reverse = heading.map(Dir::opposite);
    let walled = grid.is_wall(target);
    let is_goal = |pos: Pos| {
        pos == target || (walled && Dir::ALL.into_iter().any(|dir| pos.step(dir) == Some(target)))
    };
    if is_goal(start) {
        return hold_course(grid, start, heading);
    }

    let width = grid.width();
    let Some(start_idx) = grid.index(start) else {
        trace!(?start, "path start off the board");
        return random_open_dir(grid, start, reverse, rng);
    };

    let mut prev: Vec<Option<usize>> = vec![None; width * grid.height()];
    let mut seen = vec![false; width * grid.height()];
    let mut q = VecDeque::new();
    seen[start_idx] = true;
    q.push_back(start);

    let mut reached = None;
    while let Some(pos) = q.pop_front() {
        let idx = pos.y * width + pos.x;
        if is_goal(pos) {
            reached = Some(idx);
            break;
        }
        for dir in Dir::ALL {
            if pos == start && Some(dir) == reverse {
                continue;
            }
            let Some(next) = grid.open_neighbor(pos, dir) else {
                continue;
            };
            let next_idx = next.y * width + next.x;
            if !seen[next_idx] {
                seen[next_idx] = true;
                prev[next_idx] = Some(idx);
                q.push_back(next);
            }
        }
    }

    let Some(mut node) = reached else {
        trace!(?start, ?target, "no path, picking a random direction");
        return random_open_dir(grid, start, reverse, rng);
    };

    while let Some(parent) = prev[node] {
        if parent == start_idx {
            break;
        }
        node = parent;
    }
    let second = Pos {
        x: node % width,
        y: node / width,
    };
    // A reached goal other than start always has a second path node.
    Dir::between(start, second).unwrap_or_else(|| hold_course(grid, start, heading))
}

/// Breadth-first tile distances from `from`, row-major; `None` where unreachable.
pub fn distance_field(grid: &Grid, from: Pos) -> Vec<Option<u32>> {
    let width = grid.width();
    let mut dist = vec![None; width * grid.height()];
    let Some(start_idx) = grid.index(from) else {
        return dist;
    };
    if grid.is_wall(from) {
        return dist;
    }
    let mut q = VecDeque::new();
    dist[start_idx] = Some(0);
    q.push_back(from);

    while let Some(pos) = q.pop_front() {
        let base = dist[pos.y * width + pos.x].unwrap_or(0);
        for dir in Dir::ALL {
            let Some(next) = grid.open_neighbor(pos, dir) else {
                continue;
            };
            let slot = &mut dist[next.y * width + next.x];
            if slot.is_none() {
                *slot = Some(base + 1);
                q.push_back(next);
            }
        }
    }
    dist
}

fn hold_course(grid: &Grid, pos: Pos, heading: Option<Dir>) -> Dir {
    if let Some(dir) = heading.filter(|dir| grid.can_move(pos, *dir)) {
        return dir;
    }
    let reverse = heading.map(Dir::opposite);
    Dir::ALL
        .into_iter()
        .filter(|dir| grid.can_move(pos, *dir))
        .min_by_key(|dir| Some(*dir) == reverse)
        .or(heading)
        .unwrap_or(Dir::Up)
}

fn random_open_dir(grid: &Grid, pos: Pos, reverse: Option<Dir>, rng: &mut impl Rng) -> Dir {
    let options: Vec<Dir> = Dir::ALL
        .into_iter()
        .filter(|dir| Some(*dir) != reverse && grid.can_move(pos, *dir))
        .collect();
    options
        .choose(rng)
        .copied()
        .or(reverse)
        .unwrap_or(Dir::Up)
}
