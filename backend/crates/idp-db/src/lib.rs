pub mod connection;
pub mod error;
pub mod repositories;
pub mod store;

pub use connection::{connect, run_migrations};
pub use error::{ConstrainedColumn, DbError, Result};
pub use repositories::user_repository::UserRepository;
pub use store::UserStore;
