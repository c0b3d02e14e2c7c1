use super::constants::*;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// Source of a transient perturbation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// Pointer entered a content card: strong and fast-decaying.
    CardHover,
    /// A page section scrolled into view: weaker and slow-decaying.
    SectionVisible,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionPoint {
    /// x/y in page pixels relative to the viewport centre; z in ray units.
    pub position: Vec3,
    pub strength: f32,
    pub decay: f32,
    pub created_at: f64,
}

impl InteractionPoint {
    pub fn new(kind: InteractionKind, center: Vec2, created_at: f64) -> Self {
        let (z, strength, decay) = match kind {
            InteractionKind::CardHover => (CARD_HOVER_Z, CARD_HOVER_STRENGTH, CARD_HOVER_DECAY),
            InteractionKind::SectionVisible => (
                SECTION_VISIBLE_Z,
                SECTION_VISIBLE_STRENGTH,
                SECTION_VISIBLE_DECAY,
            ),
        };
        Self {
            position: center.extend(z),
            strength,
            decay,
            created_at,
        }
    }

    #[inline]
    pub fn age(&self, now: f64) -> f32 {
        (now - self.created_at) as f32
    }

    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) >= INTERACTION_LIFETIME
    }

    /// Displacement this point applies to a path sample at time `now`.
    pub fn influence_on(&self, sample: Vec3, now: f64) -> Vec3 {
        if self.is_expired(now) {
            return Vec3::ZERO;
        }
        let delta = self.position.truncate() - sample.truncate();
        let distance = delta.length();
        if distance >= INTERACTION_RADIUS {
            return Vec3::ZERO;
        }
        let d = distance.max(INTERACTION_MIN_DISTANCE);
        let strength = self.strength * (-self.decay * self.age(now) * INTERACTION_DECAY_SCALE).exp();
        let factor = strength / (1.0 + distance * INTERACTION_FALLOFF);
        Vec3::new(delta.x / d, delta.y / d, self.position.z / d) * factor
    }
}

/// Live interaction points owned by one effect instance.
#[derive(Clone, Debug, Default)]
pub struct InteractionField {
    points: SmallVec<[InteractionPoint; 8]>,
}

impl InteractionField {
    pub fn push(&mut self, point: InteractionPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[InteractionPoint] {
        &self.points
    }

    /// Drop points whose age has reached the lifetime at time `now`.
    pub fn prune(&mut self, now: f64) {
        self.points.retain(|p| !p.is_expired(now));
    }

    /// Summed displacement of all points on `sample`.
    pub fn influence(&self, sample: Vec3, now: f64) -> Vec3 {
        self.points
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + p.influence_on(sample, now))
    }
}

/// Map an element's viewport-space centre to ray-space page coordinates
/// (origin at the viewport middle).
#[inline]
pub fn viewport_to_ray_space(center_px: Vec2, viewport_px: Vec2) -> Vec2 {
    center_px - viewport_px * 0.5
}
