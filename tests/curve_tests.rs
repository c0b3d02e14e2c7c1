// Host-side tests for the Catmull-Rom path curve.

use glam::Vec3;
use light_ray::ray::PathCurve;

fn line() -> PathCurve {
    PathCurve::new((0..=12).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect())
}

fn wiggle() -> PathCurve {
    PathCurve::new(
        (0..=12)
            .map(|i| {
                let u = i as f32 / 12.0;
                Vec3::new(u * 160.0 - 80.0, (u * 5.0).sin() * 15.0, (u * 7.0).cos() * 12.0)
            })
            .collect(),
    )
}

#[test]
fn straight_line_is_reproduced_exactly() {
    let c = line();
    assert!((c.length() - 12.0).abs() < 1e-3);
    for k in 0..=20 {
        let u = k as f32 / 20.0;
        let p = c.point_at(u);
        assert!((p - Vec3::new(u * 12.0, 0.0, 0.0)).length() < 1e-3, "u={u} p={p}");
        assert!((c.tangent_at(u) - Vec3::X).length() < 1e-3);
    }
}

#[test]
fn spline_passes_through_control_points() {
    let c = wiggle();
    let pts = c.control_points().to_vec();
    for (i, p) in pts.iter().enumerate() {
        let q = c.point(i as f32 / 12.0);
        assert!((q - *p).length() < 1e-3, "point {i}: {q} vs {p}");
    }
}

#[test]
fn arc_length_mapping_is_monotonic_and_anchored() {
    let c = wiggle();
    assert_eq!(c.u_to_t(0.0), 0.0);
    assert!((c.u_to_t(1.0) - 1.0).abs() < 1e-4);
    let mut prev = 0.0;
    for k in 1..=100 {
        let t = c.u_to_t(k as f32 / 100.0);
        assert!(t >= prev, "t went backwards at {k}");
        prev = t;
    }
}

#[test]
fn arc_length_samples_are_evenly_spaced() {
    let c = wiggle();
    let n = 50;
    let step = c.length() / n as f32;
    for k in 0..n {
        let a = c.point_at(k as f32 / n as f32);
        let b = c.point_at((k + 1) as f32 / n as f32);
        // chord never exceeds arc; strong curvature keeps it a little shorter
        let chord = a.distance(b);
        assert!(chord <= step * 1.02, "segment {k}: {chord} vs {step}");
        assert!(chord >= step * 0.8, "segment {k}: {chord} vs {step}");
    }
}

#[test]
fn frames_are_orthonormal() {
    let c = wiggle();
    let f = c.frames(64);
    assert_eq!(f.tangents.len(), 65);
    for i in 0..65 {
        let (t, n, b) = (f.tangents[i], f.normals[i], f.binormals[i]);
        assert!((t.length() - 1.0).abs() < 1e-3);
        assert!((n.length() - 1.0).abs() < 1e-3);
        assert!((b.length() - 1.0).abs() < 1e-3);
        assert!(t.dot(n).abs() < 1e-3);
        assert!(t.dot(b).abs() < 1e-3);
        assert!(n.dot(b).abs() < 1e-3);
    }
}

#[test]
fn short_point_lists_give_a_degenerate_curve() {
    let empty = PathCurve::new(Vec::new());
    assert_eq!(empty.control_points().len(), 2);
    assert_eq!(empty.length(), 0.0);
    assert_eq!(empty.point_at(0.5), Vec3::ZERO);

    let p = Vec3::new(3.0, -2.0, 7.0);
    let single = PathCurve::new(vec![p]);
    assert_eq!(single.length(), 0.0);
    for k in 0..=4 {
        assert_eq!(single.point_at(k as f32 / 4.0), p);
    }
    let f = single.frames(4);
    assert_eq!(f.normals.len(), 5);
}

#[test]
fn coincident_control_points_stay_finite() {
    let c = PathCurve::new(vec![Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]);
    for k in 0..=20 {
        let p = c.point_at(k as f32 / 20.0);
        assert!(p.is_finite(), "{p}");
    }
}
