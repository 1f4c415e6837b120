pub mod queue;
pub mod worker;
