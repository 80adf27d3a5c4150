use keepsake_core::{chance, pick_uniform, pick_weighted, sample};
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn weights_three_to_one_select_roughly_three_times_as_often() {
    let mut rng = Pcg32::seed_from_u64(7);
    let candidates = [("A", 3), ("B", 1)];

    let mut a = 0u32;
    let mut b = 0u32;
    for _ in 0..20_000 {
        match *pick_weighted(&candidates, &mut rng).unwrap() {
            "A" => a += 1,
            _ => b += 1,
        }
    }

    let ratio = f64::from(a) / f64::from(b);
    assert!((2.7..3.3).contains(&ratio), "ratio was {ratio}");
}

#[test]
fn same_seed_reproduces_the_same_sequence() {
    let candidates = [("idle", 5), ("blink", 3), ("wiggle", 1)];
    let draw = |seed: u64| {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..50)
            .map(|_| *pick_weighted(&candidates, &mut rng).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(draw(42), draw(42));
    assert_ne!(draw(42), draw(43));
}

#[test]
fn zero_weight_is_never_selected() {
    let mut rng = Pcg32::seed_from_u64(1);
    let candidates = [("never", 0), ("always", 2), ("also never", 0)];
    for _ in 0..1_000 {
        assert_eq!(*pick_weighted(&candidates, &mut rng).unwrap(), "always");
    }
}

#[test]
fn no_positive_weight_yields_none() {
    let mut rng = Pcg32::seed_from_u64(1);
    let empty: [(&str, u32); 0] = [];
    assert!(pick_weighted(&empty, &mut rng).is_none());
    assert!(pick_weighted(&[("x", 0)], &mut rng).is_none());
    assert!(pick_uniform::<u8, _>(&[], &mut rng).is_none());
}

#[test]
fn sample_draws_distinct_items_up_to_the_available_count() {
    let mut rng = Pcg32::seed_from_u64(9);
    let items = [1, 2, 3, 4, 5];

    let mut drawn: Vec<i32> = sample(&items, 3, &mut rng).into_iter().copied().collect();
    assert_eq!(drawn.len(), 3);
    drawn.sort_unstable();
    drawn.dedup();
    assert_eq!(drawn.len(), 3);

    assert_eq!(sample(&items, 10, &mut rng).len(), 5);
}

#[test]
fn chance_respects_extremes() {
    let mut rng = Pcg32::seed_from_u64(3);
    assert!((0..100).all(|_| chance(10, 10, &mut rng)));
    assert!((0..100).all(|_| !chance(0, 10, &mut rng)));
}
