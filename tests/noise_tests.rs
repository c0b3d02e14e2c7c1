// Host-side tests for the seeded simplex noise field.

use light_ray::ray::noise::Simplex;

fn grid() -> impl Iterator<Item = (f32, f32, f32)> {
    (0..10).flat_map(|i| {
        (0..10).flat_map(move |j| (0..10).map(move |k| (i as f32 * 0.37, j as f32 * 0.41, k as f32 * 0.29)))
    })
}

#[test]
fn same_seed_gives_identical_field() {
    let a = Simplex::new(7);
    let b = Simplex::new(7);
    for (x, y, z) in grid() {
        assert_eq!(a.noise3(x, y, z), b.noise3(x, y, z));
    }
}

#[test]
fn different_seeds_give_different_fields() {
    let a = Simplex::new(1);
    let b = Simplex::new(2);
    let differing = grid()
        .filter(|&(x, y, z)| (a.noise3(x, y, z) - b.noise3(x, y, z)).abs() > 1e-3)
        .count();
    assert!(differing > 100, "only {differing} samples differ");
}

#[test]
fn output_is_bounded_and_varied() {
    let n = Simplex::new(42);
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for (x, y, z) in grid() {
        let v = n.noise3(x, y, z);
        assert!(v.is_finite());
        assert!((-1.0..=1.0).contains(&v), "{v} out of range");
        lo = lo.min(v);
        hi = hi.max(v);
    }
    assert!(hi - lo > 0.5, "field too flat: [{lo}, {hi}]");
}

#[test]
fn field_is_continuous() {
    let n = Simplex::new(3);
    let eps = 1e-3;
    for (x, y, z) in grid() {
        let v = n.noise3(x, y, z);
        assert!((n.noise3(x + eps, y, z) - v).abs() < 0.05);
        assert!((n.noise3(x, y + eps, z) - v).abs() < 0.05);
        assert!((n.noise3(x, y, z + eps) - v).abs() < 0.05);
    }
}
