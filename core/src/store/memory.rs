use std::collections::HashMap;

use ndarray::{ArrayD, Dimension};

use super::ArrayStore;
use crate::prelude::{AltimetryError, AltimetryResult};

/// In-memory store, used for synthetic passes and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    variables: HashMap<String, ArrayD<f64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<D: Dimension>(&mut self, name: &str, values: ndarray::Array<f64, D>) {
        self.variables.insert(name.to_string(), values.into_dyn());
    }

    pub fn with_variable<D: Dimension>(mut self, name: &str, values: ndarray::Array<f64, D>) -> Self {
        self.insert(name, values);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}

impl ArrayStore for MemoryStore {
    fn read(&self, name: &str) -> AltimetryResult<ArrayD<f64>> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| AltimetryError::MissingVariable(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn missing_variable_is_reported_by_name() {
        let store = MemoryStore::new().with_variable("time", arr1(&[1.0, 2.0]));
        assert!(store.names().eq(["time"]));
        match store.read("pole_tide") {
            Err(AltimetryError::MissingVariable(name)) => assert_eq!(name, "pole_tide"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_returns_dynamic_copy() {
        let store = MemoryStore::new().with_variable("time", arr1(&[1.0, 2.0]));
        let time = store.read("time").unwrap();
        assert_eq!(time.shape(), &[2]);
    }
}
