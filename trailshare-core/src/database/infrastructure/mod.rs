pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::InMemoryTrailRepository;
#[cfg(feature = "database")]
pub use postgres::PostgresTrailRepository;
