pub mod activity_service;
pub mod api_client;
pub mod insight_service;
pub mod meal_service;
pub mod product_service;
pub mod profile_service;
pub mod summary_service;
