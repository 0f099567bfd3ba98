//! Crate-wide error type.

/// Errors raised by the engine, the layout model, and the PCB operators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The engine was built from an empty initial population.
    #[error("initial population must not be empty")]
    EmptyPopulation,

    /// Removing one edge split a net into more than two pieces.
    ///
    /// A well-formed net has exactly one connected component, so dropping a
    /// single edge can leave at most two. Anything more means the genome is
    /// corrupted and the run must stop.
    #[error("net {net} split into {components} components after removing one edge")]
    NetCorrupted { net: usize, components: usize },

    /// A genome handed in from outside does not satisfy the layout invariants.
    #[error("invalid genome: {0}")]
    InvalidGenome(String),

    /// The worker thread pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
