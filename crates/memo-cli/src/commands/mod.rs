pub mod init;
pub mod misc;
pub mod notes;
pub mod status;
pub mod verify;
