pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

pub use application::{AppError, LedgerStore};
pub use domain::*;
pub use storage::{FileStorage, MemoryStorage, Storage};
