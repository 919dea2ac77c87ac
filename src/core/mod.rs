// Core modules implementing the library probes and error modeling.
pub mod compression;
pub mod error;
pub mod probe;
pub mod resolver;
