pub mod admin_emails;
pub mod contacts;
pub mod reorder;

pub use admin_emails::admin_emails_get;
pub use contacts::{contact_create, contact_delete, contact_list, contact_update};
pub use reorder::contacts_reorder;
