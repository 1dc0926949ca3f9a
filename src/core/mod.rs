pub mod add;
pub mod backup;
pub mod del;
pub mod due;
pub mod list;
pub mod log;
pub mod query;
pub mod schedule;
