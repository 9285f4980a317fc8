/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

mod color;

#[doc(inline)]
pub use color::Color;
