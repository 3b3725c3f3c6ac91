pub mod trails;

pub use trails::PostgresTrailRepository;
