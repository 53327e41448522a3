//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod copy;
pub mod delete;
pub mod init;
pub mod list;
pub mod update;
