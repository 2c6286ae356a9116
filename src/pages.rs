//! Page generation modules for different view types
//!
//! Each page module builds one kind of full HTML document from shared
//! components.

pub mod blog_index;
pub mod not_found;
pub mod post;
