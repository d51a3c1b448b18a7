//! Values that cells bind for later cells

use std::collections::BTreeMap;

use crate::chart::Chart;
use crate::frame::Frame;

/// A value defined by a cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Frame(Frame),
    Float(f64),
    Int(i64),
    Chart(Chart),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Frame(_) => "frame",
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Chart(_) => "chart",
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Value::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_chart(&self) -> Option<&Chart> {
        match self {
            Value::Chart(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Frame> for Value {
    fn from(frame: Frame) -> Self {
        Value::Frame(frame)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Chart> for Value {
    fn from(chart: Chart) -> Self {
        Value::Chart(chart)
    }
}

/// Name -> value table accumulated while a notebook runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.get(name).and_then(Value::as_frame)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
