pub mod document;
pub mod error;
pub mod id;
pub mod kind;
pub mod operation;
pub mod role;
pub mod time;

pub use document::{DocumentEnvelope, DocumentMeta};
pub use error::{CoreError, ErrorCategory, Result};
pub use id::{generate_id, validate_id};
pub use kind::ResourceKind;
pub use operation::Operation;
pub use role::Role;
pub use time::{Timestamp, now_utc};
