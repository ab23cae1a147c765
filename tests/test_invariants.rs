//! Invariants 1-6 from spec.md §3, exercised through the public `Connections`
//! facade across a handful of learning iterations.

use rand::SeedableRng;
use spatial_pooler::{BitField, Connections, SpConfig, SYN_PERM_MAX, SYN_PERM_MIN};

fn test_config() -> SpConfig {
    SpConfig {
        input_dimensions: vec![40],
        column_dimensions: vec![20],
        potential_radius: 20,
        potential_pct: 0.5,
        global_inhibition: true,
        local_area_density: -1.0,
        num_active_columns_per_inh_area: 4.0,
        stimulus_threshold: 1,
        syn_perm_inactive_dec: 0.008,
        syn_perm_active_inc: 0.05,
        syn_perm_below_stimulus_inc: 0.01,
        syn_perm_trim_threshold: 0.05,
        syn_perm_connected: 0.1,
        min_pct_overlap_duty_cycle: 0.001,
        min_pct_active_duty_cycle: 0.001,
        duty_cycle_period: 100,
        max_boost: 5.0,
        update_period: 10,
        seed: 99,
        wrap_around: true,
    }
}

#[test]
fn potential_pool_size_never_changes_after_init() {
    let mut conn = Connections::new(test_config()).unwrap();
    conn.init().unwrap();
    let sizes_before: Vec<usize> = (0..conn.num_columns())
        .map(|c| conn.column_permanences(c).len())
        .collect();

    let mut input_rng = rand::rngs::StdRng::seed_from_u64(3);
    let mut active = BitField::new(conn.num_columns());
    for _ in 0..20 {
        let mut input = BitField::new(conn.num_inputs());
        input.random_set_pct(&mut input_rng, 0.3);
        conn.compute(&input, &mut active, true, false).unwrap();
    }

    let sizes_after: Vec<usize> = (0..conn.num_columns())
        .map(|c| conn.column_permanences(c).len())
        .collect();
    assert_eq!(sizes_before, sizes_after);
}

#[test]
fn permanences_stay_in_range_and_trimmed_values_are_exactly_zero() {
    let mut conn = Connections::new(test_config()).unwrap();
    conn.init().unwrap();

    let mut input_rng = rand::rngs::StdRng::seed_from_u64(5);
    let mut active = BitField::new(conn.num_columns());
    for _ in 0..30 {
        let mut input = BitField::new(conn.num_inputs());
        input.random_set_pct(&mut input_rng, 0.3);
        conn.compute(&input, &mut active, true, false).unwrap();
    }

    for c in 0..conn.num_columns() {
        for &p in conn.column_permanences(c) {
            assert!(p >= SYN_PERM_MIN && p <= SYN_PERM_MAX);
            assert!(!(p > 0.0 && p <= 0.05), "permanence {p} should have been trimmed to 0");
        }
    }
}

#[test]
fn connected_count_equals_the_number_of_connected_pool_entries() {
    let mut conn = Connections::new(test_config()).unwrap();
    conn.init().unwrap();

    for c in 0..conn.num_columns() {
        let connected = conn.column_connected_indices(c);
        let perms = conn.column_permanences(c);
        let expected = perms.iter().filter(|&&p| p >= 0.1).count();
        assert_eq!(connected.len(), expected);
    }
}

#[test]
fn active_array_popcount_equals_the_number_of_active_columns() {
    let mut conn = Connections::new(test_config()).unwrap();
    conn.init().unwrap();

    let mut input = BitField::new(conn.num_inputs());
    input.set_acts(&[0, 5, 10, 15, 20, 25, 30]);
    let mut active = BitField::new(conn.num_columns());

    conn.compute(&input, &mut active, false, false).unwrap();
    assert_eq!(active.num_set(), active.get_acts().len());
}
