mod container;
mod instance;
mod piece;
mod placed_piece;
mod result;

#[doc(inline)]
pub use container::Container;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use piece::Piece;

#[doc(inline)]
pub use piece::PiecePlacement;

#[doc(inline)]
pub use placed_piece::PlacedPiece;

#[doc(inline)]
pub use result::ContainerRecord;

#[doc(inline)]
pub use result::PieceRecord;

#[doc(inline)]
pub use result::RenderGeometry;

#[doc(inline)]
pub use result::ResultRecord;

#[doc(inline)]
pub use result::split_groups;
