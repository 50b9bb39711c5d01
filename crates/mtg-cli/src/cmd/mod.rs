pub mod ack;
pub mod add;
pub mod daily_setup;
pub mod init;
pub mod list;
pub mod nowish;
pub mod prune;
