//! Entity types and request payloads.

mod cast;
mod movie;
mod patch;

pub use cast::{Cast, CastId, CastPatch, NewCast};
pub use movie::{Movie, MovieId, MoviePatch, NewMovie};
pub use patch::Patch;
