pub mod identity;
pub mod like;
