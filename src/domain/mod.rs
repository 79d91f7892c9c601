mod metrics;
mod models;
mod repository;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the persistence abstraction and its models
pub use models::{CartItem, CartLine, Genre, NewRecord, Record, RecordWithGenre, User};
pub use repository::{Repository, RepositoryPtr};
