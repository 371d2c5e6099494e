use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Seed used for the display sample unless configured otherwise.
pub const DEFAULT_SEED: u64 = 42;

/// Draw `n` items uniformly without replacement.
///
/// When `items.len() <= n` the input is returned unchanged. Otherwise the
/// result holds exactly `n` distinct items in draw order; the same `seed` and
/// input always give the same result.
pub fn sample_records<T>(items: Vec<T>, n: usize, seed: u64) -> Vec<T> {
    if items.len() <= n {
        return items;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = index::sample(&mut rng, items.len(), n);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
