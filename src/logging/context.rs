//! Caller supplied context and its normalization into tags.
//!
//! A [`Context`] is resolved once, when it is built, into one of a fixed set of
//! shapes. [`normalize`] then turns that shape into a flat [`Tags`] map. Types
//! that want to pick their own shape implement [`Contextual`] and go through
//! [`Context::of`], which checks the capabilities in a fixed order: error
//! first, then text, then record fields.

use std::{
    any::type_name,
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use super::tags::Tags;
use crate::error::InvalidContextError;

pub const ERROR_KEY: &str = "error";
pub const CONTEXT_KEY: &str = "context";

/// A single named value of a record style context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub exported: bool,
}

impl Field {
    pub fn exported(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            exported: true,
        }
    }

    /// A field that is part of the record but never ends up in the tags.
    pub fn private(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            exported: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    Empty,
    Error(String),
    Text(String),
    Map(Vec<(String, String)>),
    Record(Vec<Field>),
    Unsupported(String),
}

/// Capabilities a value can expose to be used as a [`Context`].
///
/// Every method defaults to `None`. A type that exposes none of them is
/// rejected when the context is normalized.
pub trait Contextual {
    fn error(&self) -> Option<String> {
        None
    }

    fn text(&self) -> Option<String> {
        None
    }

    fn fields(&self) -> Option<Vec<Field>> {
        None
    }
}

impl<T: Contextual + ?Sized> Contextual for &T {
    fn error(&self) -> Option<String> {
        (**self).error()
    }

    fn text(&self) -> Option<String> {
        (**self).text()
    }

    fn fields(&self) -> Option<Vec<Field>> {
        (**self).fields()
    }
}

impl<T: Contextual + ?Sized> Contextual for Box<T> {
    fn error(&self) -> Option<String> {
        (**self).error()
    }

    fn text(&self) -> Option<String> {
        (**self).text()
    }

    fn fields(&self) -> Option<Vec<Field>> {
        (**self).fields()
    }
}

impl Context {
    pub fn none() -> Self {
        Context::Empty
    }

    pub fn of<T: Contextual + ?Sized>(value: &T) -> Self {
        if let Some(description) = value.error() {
            return Context::Error(description);
        }

        if let Some(text) = value.text() {
            return Context::Text(text);
        }

        match value.fields() {
            Some(fields) => Context::Record(fields),
            None => Context::Unsupported(type_name::<T>().to_string()),
        }
    }

    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Context::Error(err.to_string())
    }

    pub fn from_display<D: Display + ?Sized>(value: &D) -> Self {
        Context::Text(value.to_string())
    }

    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: ToString,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        Context::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn record(fields: impl IntoIterator<Item = Field>) -> Self {
        Context::Record(fields.into_iter().collect())
    }
}

/// Flattens a context into tags.
pub fn normalize(context: &Context) -> Result<Tags, InvalidContextError> {
    let mut tags = Tags::new();

    match context {
        Context::Empty => {}
        Context::Error(description) => {
            tags.insert(ERROR_KEY.to_string(), description.clone());
        }
        Context::Text(text) => {
            tags.insert(CONTEXT_KEY.to_string(), text.clone());
        }
        Context::Map(pairs) => {
            for (key, value) in pairs {
                tags.insert(key.clone(), value.clone());
            }
        }
        Context::Record(fields) => {
            for field in fields.iter().filter(|f| f.exported) {
                tags.insert(field.name.clone(), field.value.clone());
            }
        }
        Context::Unsupported(type_name) => return Err(InvalidContextError::new(type_name)),
    }

    Ok(tags)
}

impl From<()> for Context {
    fn from(_: ()) -> Self {
        Context::Empty
    }
}

impl From<&Context> for Context {
    fn from(context: &Context) -> Self {
        context.clone()
    }
}

impl<T: Into<Context>> From<Option<T>> for Context {
    fn from(value: Option<T>) -> Self {
        value.map_or(Context::Empty, Into::into)
    }
}

impl<T: Into<Context>> From<Box<T>> for Context {
    fn from(value: Box<T>) -> Self {
        (*value).into()
    }
}

impl<K: ToString, V: ToString, S> From<HashMap<K, V, S>> for Context {
    fn from(map: HashMap<K, V, S>) -> Self {
        Context::map(map)
    }
}

impl<K: ToString, V: ToString, S> From<&HashMap<K, V, S>> for Context {
    fn from(map: &HashMap<K, V, S>) -> Self {
        Context::map(map.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }
}

impl<K: ToString, V: ToString> From<BTreeMap<K, V>> for Context {
    fn from(map: BTreeMap<K, V>) -> Self {
        Context::map(map)
    }
}

impl<K: ToString, V: ToString> From<&BTreeMap<K, V>> for Context {
    fn from(map: &BTreeMap<K, V>) -> Self {
        Context::map(map.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }
}

impl<K: ToString, V: ToString, const N: usize> From<[(K, V); N]> for Context {
    fn from(pairs: [(K, V); N]) -> Self {
        Context::map(pairs)
    }
}

// A bare string is neither a map nor a record.
impl From<&str> for Context {
    fn from(_: &str) -> Self {
        Context::Unsupported(type_name::<&str>().to_string())
    }
}

impl From<String> for Context {
    fn from(_: String) -> Self {
        Context::Unsupported(type_name::<String>().to_string())
    }
}
