pub mod state;
pub mod worker;
