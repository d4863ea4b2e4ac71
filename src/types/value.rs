use std::fmt;

use serde_json::{Map, Number};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    True,
    False,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::True => "true",
            ValueKind::False => "false",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A parsed JSON value. All referenced data lives in the arena `'a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Null,
    True,
    False,
    Int(i32),
    Float(f64),
    String(&'a str),
    Array(Array<'a>),
    Object(Object<'a>),
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::True => ValueKind::True,
            Value::False => ValueKind::False,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of either an `Int` or a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(f64::from(*value)),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Array<'a>> {
        match self {
            Value::Array(array) => Some(*array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<Object<'a>> {
        match self {
            Value::Object(object) => Some(*object),
            _ => None,
        }
    }

    /// Copies the tree into a `serde_json::Value`.
    ///
    /// Duplicate object keys collapse: the last value wins and keeps the
    /// position of the first occurrence. Non-finite floats become `null`.
    /// Nesting is walked with an explicit stack, so depth is bounded by
    /// memory rather than the call stack.
    pub fn to_json(&self) -> serde_json::Value {
        let mut stack: Vec<JsonFrame<'a>> = Vec::new();
        let mut current = *self;
        loop {
            let mut finished = match current {
                Value::Array(array) => {
                    stack.push(JsonFrame::Array {
                        items: Vec::with_capacity(array.len()),
                        rest: array.iter(),
                    });
                    None
                }
                Value::Object(object) => {
                    stack.push(JsonFrame::Object {
                        map: Map::with_capacity(object.len()),
                        rest: object.iter(),
                        key: "",
                    });
                    None
                }
                scalar => Some(scalar.scalar_json()),
            };

            loop {
                let Some(frame) = stack.last_mut() else {
                    return finished.unwrap_or(serde_json::Value::Null);
                };
                if let Some(value) = finished.take() {
                    frame.accept(value);
                }
                if let Some(child) = frame.next_child() {
                    current = child;
                    break;
                }
                finished = stack.pop().map(JsonFrame::finish);
            }
        }
    }

    fn scalar_json(&self) -> serde_json::Value {
        match self {
            Value::True => serde_json::Value::Bool(true),
            Value::False => serde_json::Value::Bool(false),
            Value::Int(value) => serde_json::Value::Number(Number::from(*value)),
            Value::Float(value) => Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(value) => serde_json::Value::String((*value).to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => serde_json::Value::Null,
        }
    }
}

/// Container being rebuilt by [`Value::to_json`]. `key` is the key of the
/// child currently being converted.
enum JsonFrame<'a> {
    Array {
        items: Vec<serde_json::Value>,
        rest: std::slice::Iter<'a, Value<'a>>,
    },
    Object {
        map: Map<String, serde_json::Value>,
        rest: std::slice::Iter<'a, Pair<'a>>,
        key: &'a str,
    },
}

impl<'a> JsonFrame<'a> {
    fn next_child(&mut self) -> Option<Value<'a>> {
        match self {
            JsonFrame::Array { rest, .. } => rest.next().copied(),
            JsonFrame::Object { rest, key, .. } => rest.next().map(|pair| {
                *key = pair.key;
                pair.value
            }),
        }
    }

    fn accept(&mut self, value: serde_json::Value) {
        match self {
            JsonFrame::Array { items, .. } => items.push(value),
            JsonFrame::Object { map, key, .. } => {
                map.insert((*key).to_string(), value);
            }
        }
    }

    fn finish(self) -> serde_json::Value {
        match self {
            JsonFrame::Array { items, .. } => serde_json::Value::Array(items),
            JsonFrame::Object { map, .. } => serde_json::Value::Object(map),
        }
    }
}

/// Closed array. Items keep source order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Array<'a> {
    items: &'a [Value<'a>],
}

impl<'a> Array<'a> {
    pub(crate) fn new(items: &'a [Value<'a>]) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value<'a>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Value<'a>> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &'a [Value<'a>] {
        self.items
    }
}

impl<'a> IntoIterator for Array<'a> {
    type Item = &'a Value<'a>;
    type IntoIter = std::slice::Iter<'a, Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair<'a> {
    pub key: &'a str,
    pub value: Value<'a>,
}

/// Closed object. Pairs keep source order and duplicate keys are retained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Object<'a> {
    pairs: &'a [Pair<'a>],
}

impl<'a> Object<'a> {
    pub(crate) fn new(pairs: &'a [Pair<'a>]) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value<'a>> {
        self.pairs
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| &pair.value)
    }

    pub fn get_all<'k>(&self, key: &'k str) -> impl Iterator<Item = &'a Value<'a>> + 'k
    where
        'a: 'k,
    {
        self.pairs
            .iter()
            .filter(move |pair| pair.key == key)
            .map(|pair| &pair.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.pairs.iter().map(|pair| pair.key)
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Pair<'a>> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &'a [Pair<'a>] {
        self.pairs
    }
}

impl<'a> IntoIterator for Object<'a> {
    type Item = &'a Pair<'a>;
    type IntoIter = std::slice::Iter<'a, Pair<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
