pub mod activity;
pub mod insight;
pub mod meal;
pub mod product;
pub mod profile;
pub mod recommendation;
pub mod summary;
