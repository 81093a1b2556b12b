//! Input-shape validation.
//!
//! The validator accepts anything convertible into [`Input`]. Only text that
//! is non-empty after trimming whitespace is handed to the parser.

use syntaxgate_core::Diagnostic;

/// Shared by every input-shape rejection (non-string, non-UTF-8, blank).
pub const NON_EMPTY_STRING: &str = "source code must be a non-empty string";

/// A value purporting to be source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Textual source.
    Text(&'a str),
    /// Raw bytes; accepted only if they are valid UTF-8.
    Bytes(&'a [u8]),
    /// A non-string value, named by its type.
    Other(&'static str),
}

impl<'a> Input<'a> {
    /// Short type name for traces.
    pub fn type_name(&self) -> &'static str {
        match self {
            Input::Text(_) => "str",
            Input::Bytes(_) => "bytes",
            Input::Other(name) => name,
        }
    }

    /// Size in bytes, if the input has one.
    pub fn byte_len(&self) -> Option<usize> {
        match self {
            Input::Text(text) => Some(text.len()),
            Input::Bytes(bytes) => Some(bytes.len()),
            Input::Other(_) => None,
        }
    }

    /// Check the input shape, yielding the text to parse.
    pub fn source(&self) -> Result<&'a str, Diagnostic> {
        let text = match *self {
            Input::Text(text) => text,
            Input::Bytes(bytes) => {
                std::str::from_utf8(bytes).map_err(|_| Diagnostic::input(NON_EMPTY_STRING))?
            }
            Input::Other(_) => return Err(Diagnostic::input(NON_EMPTY_STRING)),
        };

        if text.trim().is_empty() {
            return Err(Diagnostic::input(NON_EMPTY_STRING));
        }

        Ok(text)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

/// `None` is an absent value, not an empty string.
impl<'a, T: Into<Input<'a>>> From<Option<T>> for Input<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Input::Other("none"),
        }
    }
}

impl<'a> From<&'a serde_json::Value> for Input<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(text) => Input::Text(text),
            Value::Null => Input::Other("null"),
            Value::Bool(_) => Input::Other("bool"),
            Value::Number(_) => Input::Other("number"),
            Value::Array(_) => Input::Other("array"),
            Value::Object(_) => Input::Other("object"),
        }
    }
}

macro_rules! non_text_inputs {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input<'_> {
                fn from(_: $ty) -> Self {
                    Input::Other(stringify!($ty))
                }
            }
        )*
    };
}

non_text_inputs!(bool, char, i32, i64, u32, u64, usize, f32, f64);
