pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod history;
pub mod init;
pub mod list;
pub mod log;
pub mod mark;
pub mod pause;
pub mod postpone;
pub mod view;
