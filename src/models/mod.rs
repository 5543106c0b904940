//! Stash record types
//!
//! Attribute names follow the GraphQL schema so selections and replies line up
//! without renaming. Relations hold `Tracked` records whose received sets reflect
//! the nested selection they arrived with.

pub mod gallery;
pub mod image;
pub mod performer;
pub mod scene;
pub mod studio;
pub mod tag;

pub use gallery::Gallery;
pub use image::Image;
pub use performer::{Gender, Performer};
pub use scene::Scene;
pub use studio::Studio;
pub use tag::Tag;
