pub mod infrastructure;
pub mod ports;

pub use infrastructure::InMemoryTrailRepository;
#[cfg(feature = "database")]
pub use infrastructure::PostgresTrailRepository;
pub use ports::trails::TrailRepository;
