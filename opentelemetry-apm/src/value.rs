//! Conversions and validation for attribute values.
//!
//! Scalars go through [`IntoScalar`], list elements through [`ListItem`]. In
//! both cases `None` stands for a missing value: a missing scalar is an error,
//! a missing list element is dropped.
use crate::error::{AttributeError, AttributeResult};
use opentelemetry::{otel_debug, Key, StringValue, Value};
use std::{borrow::Cow, sync::Arc};

/// Values accepted by [`set`](crate::set).
///
/// Implemented for the scalar kinds an attribute can hold, the narrower
/// numeric types that widen losslessly into them, the string types
/// [`Value`] converts from, [`Value`] itself and `Option` of all of these.
pub trait IntoScalar {
    /// Convert into an attribute value, `None` if the value is missing.
    fn into_scalar(self) -> Option<Value>;
}

impl IntoScalar for Value {
    fn into_scalar(self) -> Option<Value> {
        Some(self)
    }
}

impl<T: IntoScalar> IntoScalar for Option<T> {
    fn into_scalar(self) -> Option<Value> {
        self.and_then(IntoScalar::into_scalar)
    }
}

macro_rules! into_scalar {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoScalar for $t {
                fn into_scalar(self) -> Option<Value> {
                    Some(Value::from(self))
                }
            }
        )+
    };
}

into_scalar!(
    bool,
    i64,
    f64,
    StringValue,
    &'static str,
    String,
    Arc<str>,
    Cow<'static, str>,
);

macro_rules! widen_scalar {
    ($($t:ty => $wide:ty),+ $(,)?) => {
        $(
            impl IntoScalar for $t {
                fn into_scalar(self) -> Option<Value> {
                    Some(Value::from(<$wide>::from(self)))
                }
            }
        )+
    };
}

widen_scalar!(
    i8 => i64,
    i16 => i64,
    i32 => i64,
    u8 => i64,
    u16 => i64,
    u32 => i64,
    f32 => f64,
);

/// Elements accepted by the list writers.
///
/// `T` is the element type stored in the attribute array. Every `T` and
/// `Option<T>` qualifies; string lists additionally take `&'static str` and
/// `String` elements.
pub trait ListItem<T> {
    /// Convert into a list element, `None` if the element is missing.
    fn into_item(self) -> Option<T>;
}

impl<T> ListItem<T> for T {
    fn into_item(self) -> Option<T> {
        Some(self)
    }
}

impl<T> ListItem<T> for Option<T> {
    fn into_item(self) -> Option<T> {
        self
    }
}

impl ListItem<StringValue> for &'static str {
    fn into_item(self) -> Option<StringValue> {
        Some(self.into())
    }
}

impl ListItem<StringValue> for String {
    fn into_item(self) -> Option<StringValue> {
        Some(self.into())
    }
}

impl ListItem<StringValue> for Option<&'static str> {
    fn into_item(self) -> Option<StringValue> {
        self.map(Into::into)
    }
}

impl ListItem<StringValue> for Option<String> {
    fn into_item(self) -> Option<StringValue> {
        self.map(Into::into)
    }
}

/// Check a converted scalar before it is written under `key`.
pub(crate) fn validate_scalar(key: &Key, value: Option<Value>) -> AttributeResult<Value> {
    let Some(value) = value else {
        return Err(AttributeError::InvalidValue {
            key: key.to_string(),
            reason: "value cannot be null",
        });
    };

    match value {
        Value::F64(v) if v.is_nan() => Err(AttributeError::InvalidValue {
            key: key.to_string(),
            reason: "f64 value must not be NaN",
        }),
        Value::F64(v) if v.is_infinite() => Err(AttributeError::InvalidValue {
            key: key.to_string(),
            reason: "f64 value must not be infinite",
        }),
        Value::Bool(_) | Value::I64(_) | Value::F64(_) | Value::String(_) => Ok(value),
        Value::Array(_) => Err(unsupported(key, "array")),
        _ => Err(unsupported(key, "unknown")),
    }
}

fn unsupported(key: &Key, type_name: &'static str) -> AttributeError {
    AttributeError::UnsupportedType {
        key: key.to_string(),
        type_name,
    }
}

/// Collect list elements, dropping missing ones and any rejected by `keep`.
///
/// Fails when `values` is empty, or when nothing survives filtering.
pub(crate) fn collect_list<T, I, F>(key: &Key, values: I, keep: F) -> AttributeResult<Vec<T>>
where
    I: IntoIterator,
    I::Item: ListItem<T>,
    F: Fn(&T) -> bool,
{
    let mut total = 0usize;
    let filtered: Vec<T> = values
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(ListItem::<T>::into_item)
        .filter(|item| keep(item))
        .collect();

    if total == 0 {
        return Err(AttributeError::InvalidList(key.to_string()));
    }
    if filtered.is_empty() {
        return Err(AttributeError::EmptyAfterFilter(key.to_string()));
    }

    let dropped = total - filtered.len();
    if dropped > 0 {
        otel_debug!(
            name: "ApmAttributes.ListElementsDropped",
            key = key.as_str(),
            dropped = dropped,
        );
    }

    Ok(filtered)
}

/// Keep everything.
pub(crate) fn any<T>(_: &T) -> bool {
    true
}

/// Keep finite floats only.
pub(crate) fn finite(v: &f64) -> bool {
    v.is_finite()
}
