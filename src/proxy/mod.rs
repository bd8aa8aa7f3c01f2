//! Proxy module
//!
//! Handles request forwarding to the generation backend.

pub mod backend;
pub mod logging;

pub use backend::GeneratorClient;
pub use logging::RequestContext;
