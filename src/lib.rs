#![allow(non_snake_case)]

use types::Float;
pub extern crate nalgebra as na;

pub mod body;
pub mod calculator;
pub mod config;
pub mod error;
pub mod identification;
pub mod inertia;
pub mod joint;
pub mod regressor;
pub mod report;
pub mod spatial;
pub mod types;
pub mod util;

pub use error::{Result, SysIdError};

pub const WORLD_FRAME: &str = "world";

pub const PI: Float = std::f64::consts::PI;
pub const TWO_PI: Float = 2.0 * PI;
