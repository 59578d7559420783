pub mod configuration;
pub mod environment;
pub mod into_http;
pub mod logic;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod validation;

pub use environment::Environment;
pub use logic::{Document, DocumentLogic, InMemoryDocuments};
pub use validation::{OutputValidator, RequestKind, ShapeValidator, ValidationError};
