pub mod algebra;
pub mod spatial_vector;
pub mod transform;
