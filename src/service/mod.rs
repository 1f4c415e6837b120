pub mod assistant_service;
pub mod day_listing;
pub mod weather_service;
