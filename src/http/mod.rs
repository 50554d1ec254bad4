//! HTTP module
//!
//! Provides the client context object and the transport seam it sends
//! requests through.
//!
//! # Overview
//!
//! - **Transport**: `send(request) -> response`, one HTTP exchange, no retries
//! - **HttpClient**: base URL, credentials and transport in one cloneable handle
//! - **Errors**: statuses >= 400 become `Error::Server`, network failures `Error::Transport`

mod client;
mod options;
mod transport;

pub use client::{ClientConfig, ClientConfigBuilder, HttpClient, RequestConfig};
pub use options::{
    AuditContext, RequestOptions, COMMENT_HEADER, CREATED_BY_HEADER, REASON_HEADER,
};
pub use transport::{encode_path_segment, HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub(crate) use transport::set_header;
