//! Authentication module
//!
//! Kill Bill authenticates every call twice: HTTP basic auth identifies the
//! user, and the tenant API key/secret headers select the tenant. Both are
//! carried by [`Credentials`] and rendered into request headers.

mod types;

pub use types::{
    BasicAuth, Credentials, TenantKeys, API_KEY_HEADER, API_SECRET_HEADER,
};
