pub mod compute;
pub mod init;
