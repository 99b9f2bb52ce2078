pub mod favorites;
pub mod update;

pub use favorites::{favorite_add, favorite_list, favorite_remove};
pub use update::profile_update;
