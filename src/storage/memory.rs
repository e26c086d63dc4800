use super::{FieldSink, FieldSource};
use crate::{
    field::InflowField,
    utils::{CorrectionError, Result},
};

/// Keeps a field in memory. Used when the data does not come from disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    field: Option<InflowField>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(field: InflowField) -> Self {
        Self { field: Some(field) }
    }

    pub fn field(&self) -> Option<&InflowField> {
        self.field.as_ref()
    }

    pub fn into_field(self) -> Option<InflowField> {
        self.field
    }
}

impl FieldSource for MemoryStore {
    fn load(&self) -> Result<InflowField> {
        self.field
            .clone()
            .ok_or_else(|| CorrectionError::Storage("memory store is empty".to_string()))
    }
}

impl FieldSink for MemoryStore {
    fn store(&mut self, field: &InflowField) -> Result<()> {
        self.field = Some(field.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn test_empty_store_fails_to_load() {
        let err = MemoryStore::new().load().unwrap_err();
        assert!(matches!(err, CorrectionError::Storage(_)));
    }

    #[test]
    fn test_store_then_load() {
        let field = InflowField::new(
            Array2::ones((3, 2)),
            Array2::zeros((3, 2)),
            Array2::zeros((3, 2)),
            Array1::from(vec![1.0, 2.0, 3.0]),
        )
        .unwrap();

        let mut store = MemoryStore::new();
        store.store(&field).unwrap();
        assert_eq!(store.load().unwrap(), field);
        assert_eq!(store.into_field(), Some(field));
    }
}
