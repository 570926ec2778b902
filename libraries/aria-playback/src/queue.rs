//! Lookahead queue construction
//!
//! `extend_queue` tops an existing queue up to capacity from the filtered
//! view, excluding the current track, recent history and anything already
//! queued. Candidate order depends on the mode: sequential walks the view
//! circularly from an anchor, shuffle picks uniformly from the eligible
//! remainder using the caller's RNG.

use aria_core::Track;
use rand::Rng;
use std::collections::HashSet;

/// Extend `existing` up to `capacity` tracks drawn from `view`
///
/// Returns `existing` unchanged when there is no current track. The result
/// never exceeds `capacity` and may be shorter when the view runs out of
/// eligible candidates. Accepted candidates are excluded immediately, so a
/// single call never repeats an id.
pub fn extend_queue(
    existing: &[Track],
    view: &[Track],
    current: Option<&Track>,
    recent_history: &[Track],
    capacity: usize,
    shuffle: bool,
    rng: &mut impl Rng,
) -> Vec<Track> {
    let Some(current) = current else {
        return existing.to_vec();
    };

    let mut queue: Vec<Track> = existing.iter().take(capacity).cloned().collect();

    let mut exclude: HashSet<String> = HashSet::new();
    exclude.insert(current.id.clone());
    exclude.extend(recent_history.iter().map(|t| t.id.clone()));
    exclude.extend(queue.iter().map(|t| t.id.clone()));

    while queue.len() < capacity {
        let anchor = queue.last().unwrap_or(current);
        let candidate = if shuffle {
            pick_random(view, &exclude, rng)
        } else {
            pick_sequential(view, &exclude, Some(anchor))
        };
        let Some(candidate) = candidate.cloned() else {
            break;
        };
        exclude.insert(candidate.id.clone());
        queue.push(candidate);
    }

    queue
}

/// Position-sensitive structural equality by id
///
/// Used to skip queue replacement (and the downstream churn it causes) when
/// reconciliation produced an identical sequence.
pub fn same_queue(a: &[Track], b: &[Track]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Next eligible track walking the view circularly from the anchor
///
/// An anchor missing from the view starts the walk at index 0. Gives up
/// after one full circuit with no match.
fn pick_sequential<'a>(
    view: &'a [Track],
    exclude: &HashSet<String>,
    anchor: Option<&Track>,
) -> Option<&'a Track> {
    if view.is_empty() {
        return None;
    }
    let len = view.len() as i64;
    let anchor_index: i64 = match anchor {
        None => 0,
        Some(anchor) => view
            .iter()
            .position(|t| t.id == anchor.id)
            .map_or(-1, |i| i as i64),
    };

    for offset in 1..=len {
        let index = (anchor_index + offset).rem_euclid(len) as usize;
        let candidate = &view[index];
        if !exclude.contains(&candidate.id) {
            return Some(candidate);
        }
    }
    None
}

/// Uniform pick from the eligible remainder of the view
fn pick_random<'a>(
    view: &'a [Track],
    exclude: &HashSet<String>,
    rng: &mut impl Rng,
) -> Option<&'a Track> {
    let pool: Vec<&Track> = view.iter().filter(|t| !exclude.contains(&t.id)).collect();
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())])
}
