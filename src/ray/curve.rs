//! Open centripetal Catmull-Rom spline through the path control points.
//!
//! `point(t)` evaluates the raw spline parameter; `point_at(u)` and
//! `tangent_at(u)` walk the curve by arc length so that evenly spaced `u`
//! values land evenly spaced along the ray.

use super::constants::ARC_LENGTH_DIVISIONS;
use glam::{Quat, Vec3};

const MIN_KNOT_INTERVAL: f32 = 1e-4;
const TANGENT_DELTA: f32 = 1e-4;

#[derive(Clone, Debug)]
pub struct PathCurve {
    points: Vec<Vec3>,
    // Cumulative arc length at `ARC_LENGTH_DIVISIONS + 1` evenly spaced t values
    lengths: Vec<f32>,
}

impl PathCurve {
    /// Build a curve through `points`.
    ///
    /// Fewer than two points give a degenerate curve: a single point is held
    /// in place and an empty list collapses onto the origin.
    pub fn new(mut points: Vec<Vec3>) -> Self {
        match points.len() {
            0 => points.extend([Vec3::ZERO; 2]),
            1 => points.push(points[0]),
            _ => {}
        }
        let mut curve = Self {
            points,
            lengths: Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1),
        };
        curve.rebuild_lengths();
        curve
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn rebuild_lengths(&mut self) {
        self.lengths.clear();
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        self.lengths.push(0.0);
        for d in 1..=ARC_LENGTH_DIVISIONS {
            let p = self.point(d as f32 / ARC_LENGTH_DIVISIONS as f32);
            sum += p.distance(last);
            self.lengths.push(sum);
            last = p;
        }
    }

    /// Evaluate the spline at raw parameter `t ∈ [0, 1]`.
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;
        if seg >= n - 1 {
            seg = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[seg];
        let p2 = self.points[seg + 1];
        // Open ends are extrapolated linearly
        let p0 = if seg > 0 {
            self.points[seg - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if seg + 2 < n {
            self.points[seg + 2]
        } else {
            p2 * 2.0 - p1
        };

        centripetal_segment(p0, p1, p2, p3, weight)
    }

    /// Map arc-length fraction `u` to the raw parameter `t`.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;
        let i = match self
            .lengths
            .binary_search_by(|l| l.partial_cmp(&target).unwrap_or(std::cmp::Ordering::Less))
        {
            Ok(i) => return i as f32 / ARC_LENGTH_DIVISIONS as f32,
            Err(i) => i.clamp(1, self.lengths.len() - 1) - 1,
        };
        let before = self.lengths[i];
        let after = self.lengths[i + 1];
        let span = after - before;
        let frac = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };
        (i as f32 + frac) / ARC_LENGTH_DIVISIONS as f32
    }

    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at raw parameter `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Parallel-transported frames at `segments + 1` evenly spaced arc-length stations.
    pub fn frames(&self, segments: usize) -> Frames {
        let count = segments + 1;
        let tangents: Vec<Vec3> = (0..count)
            .map(|i| self.tangent_at(i as f32 / segments as f32))
            .collect();

        let mut normals = Vec::with_capacity(count);
        let mut binormals = Vec::with_capacity(count);

        // Seed the first normal from the axis least aligned with the tangent
        let t0 = tangents[0];
        let a = t0.abs();
        let axis = if a.x <= a.y && a.x <= a.z {
            Vec3::X
        } else if a.y <= a.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let side = t0.cross(axis).normalize_or_zero();
        normals.push(t0.cross(side));
        binormals.push(t0.cross(normals[0]));

        for i in 1..count {
            let t_prev = tangents[i - 1];
            let t_cur = tangents[i];
            let mut n = normals[i - 1];

            let axis = t_prev.cross(t_cur);
            let axis_len = axis.length();
            if axis_len > f32::EPSILON {
                let angle = t_prev.dot(t_cur).clamp(-1.0, 1.0).acos();
                n = Quat::from_axis_angle(axis / axis_len, angle) * n;
            }
            n = (n - t_cur * n.dot(t_cur)).normalize_or_zero();
            binormals.push(t_cur.cross(n));
            normals.push(n);
        }

        Frames {
            tangents,
            normals,
            binormals,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

/// Centripetal (alpha = 0.5) Catmull-Rom segment between `p1` and `p2`.
fn centripetal_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, w: f32) -> Vec3 {
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);

    // Coincident points would collapse the knot intervals
    if dt1 < MIN_KNOT_INTERVAL {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_INTERVAL {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_INTERVAL {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    // Cubic Hermite form
    let c2 = p1 * -3.0 + p2 * 3.0 - m1 * 2.0 - m2;
    let c3 = p1 * 2.0 - p2 * 2.0 + m1 + m2;
    let w2 = w * w;
    p1 + m1 * w + c2 * w2 + c3 * w2 * w
}
