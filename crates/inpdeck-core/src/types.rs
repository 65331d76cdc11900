//! Primitive value types shared by all card records.
//!
//! Each type recognizes exactly its own micro-grammar via `parse` and
//! formats canonically via [`Display`](std::fmt::Display). The round-trip
//! law `parse(format(x)) == x` holds for every valid value.

mod designator;
mod distribution;
mod entry;
mod geometry;
mod number;
mod particle;
mod transform;
mod zaid;

pub use designator::Designator;
pub use distribution::DistributionNumber;
pub use entry::Entry;
pub use geometry::Geometry;
pub use number::{format_real, parse_real};
pub use particle::Particle;
pub use transform::{Point, Rotation, TransformError, Transformation};
pub use zaid::Zaid;
