use na::Isometry3;

use crate::{
    spatial::{spatial_vector::SpatialVector, transform::Transform3D},
    types::Float,
    WORLD_FRAME,
};

/// Kinematic state of a body at one instant.
///
/// `velocity` and `acceleration` are the body's spatial velocity and
/// acceleration expressed in the body's own frame. `transform` maps the body
/// frame into the world frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    pub name: String,
    pub transform: Transform3D,
    pub velocity: SpatialVector,
    pub acceleration: SpatialVector,
}

impl BodyState {
    pub fn new(name: &str, body_to_world: &Isometry3<Float>) -> Self {
        BodyState {
            name: name.to_string(),
            transform: Transform3D::new(name, WORLD_FRAME, body_to_world),
            velocity: SpatialVector::zero(),
            acceleration: SpatialVector::zero(),
        }
    }

    pub fn with_motion(mut self, velocity: SpatialVector, acceleration: SpatialVector) -> Self {
        self.velocity = velocity;
        self.acceleration = acceleration;
        self
    }
}

/// Read access to the bodies of a multibody system, indexed 0..body_count()
pub trait BodyProvider {
    fn body_count(&self) -> usize;
    fn body_at(&self, index: usize) -> Option<&BodyState>;

    fn body_names(&self) -> Vec<String> {
        (0..self.body_count())
            .filter_map(|i| self.body_at(i).map(|body| body.name.clone()))
            .collect()
    }
}

impl BodyProvider for [BodyState] {
    fn body_count(&self) -> usize {
        self.len()
    }

    fn body_at(&self, index: usize) -> Option<&BodyState> {
        self.get(index)
    }
}

impl BodyProvider for Vec<BodyState> {
    fn body_count(&self) -> usize {
        self.len()
    }

    fn body_at(&self, index: usize) -> Option<&BodyState> {
        self.get(index)
    }
}
