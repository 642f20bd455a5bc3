pub mod entity;

pub use entity::{Like, LikeKey};
