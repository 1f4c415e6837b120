pub mod event;
pub mod seed;
pub mod store;
pub mod time_block;
