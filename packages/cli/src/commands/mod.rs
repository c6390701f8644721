pub mod catalog;
pub mod init;
pub mod replay;

pub use catalog::{blocks, themes};
pub use init::{init, InitArgs};
pub use replay::{replay, ReplayArgs};
