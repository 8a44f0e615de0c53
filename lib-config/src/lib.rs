//! Model-parameter forms: a set of typed `key=value` items, each with a
//! default and an about message, into which user-supplied values are merged.
//! Values arrive as strings (command-line pairs or a parameter file) and are
//! parsed according to the kind of the declared default.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;




// ============================================================================
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    B(bool),
    I(i64),
    F(f64),
    S(String),
}

impl From<bool>   for Value { fn from(a: bool)   -> Self { Value::B(a) } }
impl From<i32>    for Value { fn from(a: i32)    -> Self { Value::I(a as i64) } }
impl From<i64>    for Value { fn from(a: i64)    -> Self { Value::I(a) } }
impl From<f64>    for Value { fn from(a: f64)    -> Self { Value::F(a) } }
impl From<&str>   for Value { fn from(a: &str)   -> Self { Value::S(a.into()) } }
impl From<String> for Value { fn from(a: String) -> Self { Value::S(a) } }

impl Value {
    pub fn same_kind_as(&self, other: &Value) -> bool {
        matches!(
            (self, other),
            (Value::B(_), Value::B(_)) |
            (Value::I(_), Value::I(_)) |
            (Value::F(_), Value::F(_)) |
            (Value::S(_), Value::S(_)))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::B(_) => "bool",
            Value::I(_) => "int",
            Value::F(_) => "float",
            Value::S(_) => "string",
        }
    }

    /// Parse a string as a value of the same kind as `self`.
    pub fn parse_like(&self, key: &str, s: &str) -> Result<Value, ConfigError> {
        let s = s.trim();
        match self {
            Value::B(_) => s.parse().map(Value::B).map_err(|_| ConfigError::new(key, "is a badly formed bool")),
            Value::I(_) => s.parse().map(Value::I).map_err(|_| ConfigError::new(key, "is a badly formed int")),
            Value::F(_) => s.parse().map(Value::F).map_err(|_| ConfigError::new(key, "is a badly formed float")),
            Value::S(_) => Ok(Value::S(s.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::B(x) => x.fmt(f),
            Value::I(x) => x.fmt(f),
            Value::F(x) => x.fmt(f),
            Value::S(x) => x.fmt(f),
        }
    }
}




// ============================================================================
#[derive(Clone, Debug)]
pub struct Parameter {
    pub value: Value,
    pub about: String,
}




// ============================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    key: String,
    why: String,
}

impl ConfigError {
    pub fn new(key: &str, why: &str) -> ConfigError {
        ConfigError{key: key.into(), why: why.into()}
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "config key '{}' {}", self.key, self.why)
    }
}

impl std::error::Error for ConfigError {}




/**
 * A declared set of model parameters. Items are declared with `item`, which
 * fixes their kind through the default value. Merging a map of values is an
 * error if any key was not declared or has the wrong kind.
 */
#[derive(Clone, Debug, Default)]
pub struct Form {
    parameter_map: BTreeMap<String, Parameter>,
}




// ============================================================================
impl Form {
    pub fn new() -> Form {
        Form{parameter_map: BTreeMap::new()}
    }

    pub fn item<T: Into<Value>>(&self, key: &str, default: T, about: &str) -> Self {
        let mut parameter_map = self.parameter_map.clone();
        parameter_map.insert(key.into(), Parameter{value: default.into(), about: about.into()});
        Form{parameter_map}
    }

    pub fn merge_value_map(&self, items: &BTreeMap<String, Value>) -> Result<Self, ConfigError> {
        let mut parameter_map = self.parameter_map.clone();

        for (key, new_value) in items {
            let parameter = parameter_map
                .get_mut(key)
                .ok_or_else(|| ConfigError::new(key, "is not a valid key"))?;

            if !parameter.value.same_kind_as(new_value) {
                return Err(ConfigError::new(key, "has the wrong type"))
            }
            parameter.value = new_value.clone();
        }
        Ok(Form{parameter_map})
    }

    pub fn merge_string_map(&self, dict: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut parameter_map = self.parameter_map.clone();

        for (k, v) in &dict {
            let parameter = parameter_map
                .get_mut(k)
                .ok_or_else(|| ConfigError::new(k, "is not a valid key"))?;
            parameter.value = parameter.value.parse_like(k, v)?;
        }
        Ok(Form{parameter_map})
    }

    pub fn contains(&self, key: &str) -> bool {
        self.parameter_map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.parameter_map
            .get(key)
            .map(|p| &p.value)
            .ok_or_else(|| ConfigError::new(key, "is not a valid key"))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key)? { Value::B(x) => Ok(*x), _ => Err(ConfigError::new(key, "is not a bool")) }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.get(key)? { Value::I(x) => Ok(*x), _ => Err(ConfigError::new(key, "is not an int")) }
    }

    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        match self.get(key)? { Value::F(x) => Ok(*x), _ => Err(ConfigError::new(key, "is not a float")) }
    }

    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.get(key)? { Value::S(x) => Ok(x), _ => Err(ConfigError::new(key, "is not a string")) }
    }

    pub fn value_map(&self) -> BTreeMap<String, Value> {
        self.parameter_map.iter().map(|(k, p)| (k.clone(), p.value.clone())).collect()
    }
}




// ============================================================================
impl<'a> IntoIterator for &'a Form {
    type Item     = <&'a BTreeMap<String, Parameter> as IntoIterator>::Item;
    type IntoIter = <&'a BTreeMap<String, Parameter> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.parameter_map.iter()
    }
}




// ============================================================================
fn left_and_right_hand_side(a: &str) -> Result<(&str, &str), ConfigError> {
    let lr: Vec<&str> = a.split('=').collect();
    if lr.len() != 2 || lr[0].trim().is_empty() {
        Err(ConfigError::new(a, "is a badly formed argument"))
    } else {
        Ok((lr[0].trim(), lr[1].trim()))
    }
}

pub fn to_string_map_from_key_val_pairs<T: Iterator<Item=String>>(args: T) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut result = BTreeMap::new();
    for arg in args {
        let (key, value) = left_and_right_hand_side(&arg)?;
        if result.contains_key(key) {
            return Err(ConfigError::new(key, "duplicate parameter"));
        }
        result.insert(key.to_string(), value.to_string());
    }
    Ok(result)
}

/**
 * Read `key = value` pairs from a parameter file. Blank lines and anything
 * following a `#` are ignored.
 */
pub fn to_string_map_from_file<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>, ConfigError> {
    let name = path.as_ref().display().to_string();
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::new(&name, &format!("could not be read: {}", e)))?;
    to_string_map_from_key_val_pairs(text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim().to_string())
        .filter(|line| !line.is_empty()))
}
