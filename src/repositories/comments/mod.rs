pub mod comment_repo;

pub use comment_repo::*;
