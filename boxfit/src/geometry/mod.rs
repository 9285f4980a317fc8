mod grid_transform;

pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;

#[doc(inline)]
pub use geo_enums::Orientation;
#[doc(inline)]
pub use grid_transform::GridTransform;
