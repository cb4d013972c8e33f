//! Request construction and response classification.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`operation`] | Logical operations: method, auth policy, content kind |
//! | [`endpoint`] | Operation → URL under the backend base URI |
//! | [`envelope`] | Method, headers and body of one outgoing request |
//! | [`classify`] | Success / transport failure / application failure |

pub mod classify;
pub mod endpoint;
pub mod envelope;
pub mod operation;

pub use classify::{ClassifiedResult, ResponseClassifier};
pub use endpoint::EndpointRouter;
pub use envelope::{EnvelopeBuilder, RequestBody, RequestEnvelope, APPLICATION_JSON, APPLICATION_NDJSON};
pub use operation::{AuthPolicy, ContentKind, Operation};
