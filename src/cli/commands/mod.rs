pub mod add;
mod command_result;
pub mod dedup;
pub mod helper;
pub mod init;
pub mod pipeline;
pub mod prune;
pub mod scan;
pub mod sync;
pub mod usage;
pub mod validate;

pub use command_result::*;
