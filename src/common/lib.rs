use serde_json::{Map, Value};

/// Arbitrary keyed auxiliary data carried through from a source format
///
/// Values are held as JSON so that the model does not depend on how any
/// particular format stores them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lib(Map<String, Value>);

impl Lib {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Lib(map)
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}
