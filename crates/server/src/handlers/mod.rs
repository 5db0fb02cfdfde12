mod body;
mod posts;

pub use body::PostFields;
pub(crate) use posts::{create_post, delete_post, get_post, list_posts, update_post};
