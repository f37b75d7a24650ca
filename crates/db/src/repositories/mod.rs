//! Raw SQL access to each table, one zero-sized repo type per table.

pub mod todo_repo;
pub mod user_repo;

pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;
