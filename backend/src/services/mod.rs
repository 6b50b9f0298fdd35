pub mod ack;
pub mod health;
pub mod sheet;
pub mod sync_log;
