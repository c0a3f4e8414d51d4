//! Collision-aware random placement.
//!
//! Model
//! - Each target point gets independent Gaussian offsets in x and y.
//! - A candidate is accepted when its squared distance to every already placed
//!   point is `>= min_dist_sq`; otherwise a new candidate is drawn.
//! - Greedy and order dependent: accepted points are never moved again, so the
//!   traversal order of the base pattern shapes the result.
//! - `max_attempts` is the only liveness bound.

use nalgebra::Vector2;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Outcome of a single placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    Placed(Vector2<f64>),
    Failed,
}

impl Placement {
    #[inline]
    pub fn point(self) -> Option<Vector2<f64>> {
        match self {
            Placement::Placed(p) => Some(p),
            Placement::Failed => None,
        }
    }
}

#[inline]
fn collides(candidate: Vector2<f64>, placed: &[Vector2<f64>], min_dist_sq: f64) -> bool {
    placed
        .iter()
        .any(|p| (candidate - p).norm_squared() < min_dist_sq)
}

/// Jitter `base` until it clears every point in `placed`.
///
/// Returns `(placement, attempts_used)`. With `stddev <= 0` the base point is
/// returned as is without a collision check.
pub fn place_with_jitter<R: Rng + ?Sized>(
    base: Vector2<f64>,
    stddev: f64,
    placed: &[Vector2<f64>],
    min_dist_sq: f64,
    max_attempts: u32,
    rng: &mut R,
) -> (Placement, u32) {
    if !(stddev > 0.0) {
        return (Placement::Placed(base), 0);
    }
    let normal = match Normal::new(0.0, stddev) {
        Ok(n) => n,
        Err(_) => return (Placement::Failed, 0),
    };
    for attempt in 1..=max_attempts {
        let dx = normal.sample(rng);
        let dy = normal.sample(rng);
        let candidate = Vector2::new(base.x + dx, base.y + dy);
        if !collides(candidate, placed, min_dist_sq) {
            return (Placement::Placed(candidate), attempt);
        }
    }
    (Placement::Failed, max_attempts)
}

/// Incremental placer owning the already-placed set of one layout request.
#[derive(Clone, Debug)]
pub struct Placer {
    placed: Vec<Vector2<f64>>,
    stddev: f64,
    min_dist_sq: f64,
    max_attempts: u32,
    attempts: u64,
}

impl Placer {
    pub fn new(stddev: f64, min_dist: f64, max_attempts: u32) -> Self {
        Self {
            placed: Vec::new(),
            stddev,
            min_dist_sq: min_dist * min_dist,
            max_attempts,
            attempts: 0,
        }
    }

    /// Try to place `base`; accepted points join the constraint set.
    pub fn place<R: Rng + ?Sized>(&mut self, base: Vector2<f64>, rng: &mut R) -> Placement {
        let (res, used) = place_with_jitter(
            base,
            self.stddev,
            &self.placed,
            self.min_dist_sq,
            self.max_attempts,
            rng,
        );
        self.attempts += u64::from(used);
        if let Placement::Placed(p) = res {
            self.placed.push(p);
        }
        res
    }

    /// Insert `p` without any check (center-tile fallback).
    pub fn force(&mut self, p: Vector2<f64>) {
        self.placed.push(p);
    }

    #[inline]
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    #[inline]
    pub fn placed(&self) -> &[Vector2<f64>] {
        &self.placed
    }

    pub fn into_points(self) -> Vec<Vector2<f64>> {
        self.placed
    }
}
