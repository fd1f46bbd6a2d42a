//! Writers for APM attributes on the active span of a [`Context`].
//!
//! Every writer normalizes the key with [`normalize_key`], validates the value
//! and only then touches the span, so a failed call never leaves a partial
//! write behind.
use crate::{
    error::{AttributeError, AttributeResult},
    key::normalize_key,
    value::{any, collect_list, finite, validate_scalar, IntoScalar, ListItem},
};
use opentelemetry::{
    otel_debug,
    trace::{SpanRef, TraceContextExt},
    Array, Context, Key, KeyValue, StringValue, Value,
};

/// Set a scalar attribute on the span active in `cx`.
///
/// Supported values are `bool`, integers, floats and strings. `None`, NaN and
/// infinite floats are rejected with [`AttributeError::InvalidValue`], and a
/// [`Value::Array`] with [`AttributeError::UnsupportedType`]; use one of the
/// list writers for arrays.
///
/// # Examples
///
/// ```
/// use opentelemetry::{global, trace::Tracer};
///
/// global::tracer("checkout").in_span("charge", |cx| {
///     // without an installed SDK the span is a no-op, but still active
///     opentelemetry_apm::set(&cx, "user.id", 12345).unwrap();
///     opentelemetry_apm::set(&cx, "request.success", true).unwrap();
/// });
/// ```
pub fn set<V: IntoScalar>(cx: &Context, key: &str, value: V) -> AttributeResult<()> {
    let key = normalize_key(key)?;
    let value = validate_scalar(&key, value.into_scalar())?;
    write(cx, key, value)
}

/// Set a bool list attribute on the span active in `cx`.
///
/// `None` elements are dropped.
pub fn set_bool_list<I>(cx: &Context, key: &str, values: I) -> AttributeResult<()>
where
    I: IntoIterator,
    I::Item: ListItem<bool>,
{
    let key = normalize_key(key)?;
    let values = collect_list(&key, values, any)?;
    write(cx, key, Value::Array(Array::Bool(values)))
}

/// Set an integer list attribute on the span active in `cx`.
///
/// `None` elements are dropped.
pub fn set_int_list<I>(cx: &Context, key: &str, values: I) -> AttributeResult<()>
where
    I: IntoIterator,
    I::Item: ListItem<i64>,
{
    let key = normalize_key(key)?;
    let values = collect_list(&key, values, any)?;
    write(cx, key, Value::Array(Array::I64(values)))
}

/// Set a float list attribute on the span active in `cx`.
///
/// `None`, NaN and infinite elements are dropped.
///
/// # Examples
///
/// ```
/// use opentelemetry::{global, trace::Tracer};
///
/// global::tracer("checkout").in_span("charge", |cx| {
///     // written as `apm.latency = [1.0, 2.0]`
///     opentelemetry_apm::set_float_list(&cx, "latency", [1.0, f64::NAN, 2.0, f64::INFINITY])
///         .unwrap();
/// });
/// ```
pub fn set_float_list<I>(cx: &Context, key: &str, values: I) -> AttributeResult<()>
where
    I: IntoIterator,
    I::Item: ListItem<f64>,
{
    let key = normalize_key(key)?;
    let values = collect_list(&key, values, finite)?;
    write(cx, key, Value::Array(Array::F64(values)))
}

/// Set a string list attribute on the span active in `cx`.
///
/// `None` elements are dropped.
pub fn set_str_list<I>(cx: &Context, key: &str, values: I) -> AttributeResult<()>
where
    I: IntoIterator,
    I::Item: ListItem<StringValue>,
{
    let key = normalize_key(key)?;
    let values = collect_list(&key, values, any)?;
    write(cx, key, Value::Array(Array::String(values)))
}

fn write(cx: &Context, key: Key, value: Value) -> AttributeResult<()> {
    let span = active_span(cx, &key)?;
    span.set_attribute(KeyValue::new(key, value));
    Ok(())
}

fn active_span<'a>(cx: &'a Context, key: &Key) -> AttributeResult<SpanRef<'a>> {
    if cx.has_active_span() {
        Ok(cx.span())
    } else {
        otel_debug!(name: "ApmAttributes.NoActiveSpan", key = key.as_str());
        Err(AttributeError::NoActiveSpan(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{noop::NoopTracer, Tracer};

    fn assert_no_active_span(result: AttributeResult<()>, key: &str) {
        assert_eq!(result, Err(AttributeError::NoActiveSpan(key.into())));
    }

    #[test]
    fn every_writer_requires_an_active_span() {
        let cx = Context::new();

        assert_no_active_span(set(&cx, "k", 1), "apm.k");
        assert_no_active_span(set_bool_list(&cx, "flags", [true]), "apm.flags");
        assert_no_active_span(set_int_list(&cx, "ids", [1, 2]), "apm.ids");
        assert_no_active_span(set_float_list(&cx, "latency", [0.5]), "apm.latency");
        assert_no_active_span(set_str_list(&cx, "tags", ["api"]), "apm.tags");
    }

    #[test]
    fn validation_runs_before_span_lookup() {
        let cx = Context::new();

        assert!(matches!(
            set(&cx, "bad key", 1),
            Err(AttributeError::InvalidKey { .. })
        ));
        assert!(matches!(
            set(&cx, "k", f64::NAN),
            Err(AttributeError::InvalidValue { .. })
        ));
        assert_eq!(
            set_int_list(&cx, "ids", [None, None]),
            Err(AttributeError::EmptyAfterFilter("apm.ids".into()))
        );
        assert_eq!(
            set_str_list(&cx, "tags", Vec::<&'static str>::new()),
            Err(AttributeError::InvalidList("apm.tags".into()))
        );
    }

    #[test]
    fn noop_span_counts_as_active() {
        let tracer = NoopTracer::new();
        tracer.in_span("noop", |cx| {
            assert_eq!(set(&cx, "user.id", 5), Ok(()));
            assert_eq!(set_str_list(&cx, "tags", [Some("a"), None]), Ok(()));
        });
    }
}
