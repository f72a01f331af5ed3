//! Authentication: init data verification, sessions and the admin capability check.

pub mod admin;
pub mod init_data;
pub mod session;
