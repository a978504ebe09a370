pub mod docs;
pub mod model;
pub mod page;
pub mod post;
