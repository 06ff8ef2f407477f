//! Shuffle algorithms for playback ordering
//!
//! Implements both pure random (Fisher-Yates) and smart shuffle algorithms.
//! Both are driven by a caller-supplied RNG so a seed fixes the outcome.

use cadence_core::PlayableItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Pure random shuffle using Fisher-Yates algorithm
///
/// Each item has equal probability of appearing at any position.
/// Simple, fair, but can result in the same artist playing consecutively.
pub fn shuffle_random<R: Rng + ?Sized>(items: &mut [PlayableItem], rng: &mut R) {
    items.shuffle(rng);
}

/// Smart shuffle algorithm
///
/// Goals:
/// - Avoid the same creator playing consecutively (when possible)
/// - Distribute creators evenly throughout playback
/// - Maintain some randomness
///
/// Algorithm:
/// 1. Group items by creator (items without one form their own group)
/// 2. Randomize within creator groups and randomize the group order
/// 3. Round-robin through the groups
pub fn shuffle_smart<R: Rng + ?Sized>(items: &mut [PlayableItem], rng: &mut R) {
    if items.len() <= 2 {
        // Not enough items for smart shuffling
        shuffle_random(items, rng);
        return;
    }

    // BTreeMap keeps grouping order independent of hashing, so a seed is
    // enough to reproduce the result
    let mut by_creator: BTreeMap<String, Vec<PlayableItem>> = BTreeMap::new();
    for item in items.iter() {
        let key = match item.creator() {
            Some(creator) => format!("creator:{creator}"),
            None => format!("item:{}", item.id()),
        };
        by_creator.entry(key).or_default().push(item.clone());
    }

    let mut groups: Vec<Vec<PlayableItem>> = by_creator.into_values().collect();
    for group in &mut groups {
        group.shuffle(rng);
    }
    groups.shuffle(rng);

    // Round-robin through creators; reverse so pop() yields the shuffled order
    let mut queues: Vec<Vec<PlayableItem>> = groups
        .into_iter()
        .map(|mut group| {
            group.reverse();
            group
        })
        .collect();

    let mut result = Vec::with_capacity(items.len());
    while !queues.is_empty() {
        for queue in &mut queues {
            if let Some(item) = queue.pop() {
                result.push(item);
            }
        }
        queues.retain(|queue| !queue.is_empty());
    }

    for (slot, item) in items.iter_mut().zip(result) {
        *slot = item;
    }
}
