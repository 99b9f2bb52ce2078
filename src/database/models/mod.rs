pub mod contact;
pub mod favorite;
pub mod user;

pub use contact::{AdminContact, ContactUpdate, NewContact};
pub use favorite::Favorite;
pub use user::{ProfileUpdate, User, UserRow};
