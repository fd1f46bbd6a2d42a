//! # OpenTelemetry APM Attributes
//!
//! Safe, namespaced span attributes for APM backends.
//!
//! This crate validates attribute keys and values before writing them onto the
//! span active in an OpenTelemetry [`Context`](opentelemetry::Context). Keys are
//! lowercased and namespaced under [`APM_PREFIX`] (`apm.`), so `User.ID` and
//! `apm.user.id` end up as the same attribute. Values that cannot be exported
//! sensibly are rejected up front instead of reaching the exporter.
//!
//! ## Key rules
//!
//! - Surrounding whitespace is trimmed; the remainder must be non-empty.
//! - Only ASCII letters, digits and `.` are allowed.
//! - The key is lowercased and prefixed with `apm.` unless already prefixed.
//!
//! ## Value rules
//!
//! - Scalars ([`set`]) must be a `bool`, integer, float or string. `None`, NaN
//!   and infinite floats are errors.
//! - Lists ([`set_bool_list`], [`set_int_list`], [`set_float_list`],
//!   [`set_str_list`]) must not be empty. `None` elements, and NaN or infinite
//!   elements of float lists, are dropped; if nothing is left the call fails.
//!
//! Every writer returns an [`AttributeError`] on failure and never writes a
//! partial value.
//!
//! ## Usage
//!
//! The context is passed explicitly. Code that relies on the thread's current
//! context can reach it through [`Context::map_current`].
//!
//! ```
//! use opentelemetry::{global, trace::Tracer, Context};
//!
//! let tracer = global::tracer("my-service");
//! tracer.in_span("handle-request", |cx| {
//!     opentelemetry_apm::set(&cx, "user.name", "john.doe").unwrap();
//!     opentelemetry_apm::set_str_list(&cx, "tags", ["api", "production", "critical"]).unwrap();
//!
//!     let _guard = cx.attach();
//!     Context::map_current(|cx| opentelemetry_apm::set(cx, "apm.retry.count", 2)).unwrap();
//! });
//! ```
//!
//! [`Context::map_current`]: opentelemetry::Context::map_current
//!
//! ## Crate features
//!
//! - `internal-logs` (default): emit internal diagnostics, such as dropped
//!   list elements or a missing span, as `tracing` events.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/open-telemetry/opentelemetry-rust/main/assets/logo.svg"
)]
#![cfg_attr(test, deny(warnings))]

mod attributes;
mod error;
mod key;
mod value;

pub use attributes::{set, set_bool_list, set_float_list, set_int_list, set_str_list};
pub use error::{AttributeError, AttributeResult};
pub use key::{normalize_key, APM_PREFIX};
pub use value::{IntoScalar, ListItem};
