//! Weighted random selection over small candidate sets.
//!
//! Callers pass the random source explicitly; seeding it (for example with
//! `rand_pcg::Pcg32::seed_from_u64`) makes every selection reproducible.

use rand::Rng;

/// Picks one candidate with probability proportional to its weight.
///
/// Zero-weight candidates are never chosen. Returns `None` when the slice
/// is empty or every weight is zero.
pub fn pick_weighted<'a, T, R>(candidates: &'a [(T, u32)], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    let total: u64 = candidates.iter().map(|(_, weight)| u64::from(*weight)).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for (candidate, weight) in candidates {
        let weight = u64::from(*weight);
        if roll < weight {
            return Some(candidate);
        }
        roll -= weight;
    }
    None
}

/// Picks one item with equal probability.
pub fn pick_uniform<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}

/// Draws up to `count` distinct items, in the order they were drawn.
pub fn sample<'a, T, R>(items: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let count = count.min(items.len());
    for slot in 0..count {
        let swap_with = rng.random_range(slot..indices.len());
        indices.swap(slot, swap_with);
    }
    indices[..count].iter().map(|&index| &items[index]).collect()
}

/// Returns `true` with probability `numerator / denominator`.
pub fn chance<R>(numerator: u32, denominator: u32, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let hit = numerator.min(denominator);
    pick_weighted(&[(true, hit), (false, denominator - hit)], rng)
        .copied()
        .unwrap_or(false)
}
