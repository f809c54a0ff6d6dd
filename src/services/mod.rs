//! Core domain services: the partial-update merge engine and the
//! cross-service referential validator.

mod merge;
mod reference;

pub use merge::Merge;
pub use reference::{HttpCastClient, ReferenceChecker, ReferentialValidator};
