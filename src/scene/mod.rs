//! Scene model: the sequence, its layer tree, transforms and animation.

mod transform;
mod animation;
mod layer;
mod sequence;

pub use transform::*;
pub use animation::*;
pub use layer::*;
pub use sequence::*;
