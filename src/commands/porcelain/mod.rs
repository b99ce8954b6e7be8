//! Porcelain commands
//!
//! The user-facing workflow built on the object store:
//!
//! - `init`: create a repository
//! - `add`: stage files
//! - `commit`: commit the staged files
//! - `checkout`: write a commit's tree into an empty directory
//! - `log`: print commit ancestry as a graphviz digraph

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
