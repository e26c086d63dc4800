//! Where inflow fields are read from and written to.

use crate::{field::InflowField, utils::Result};

#[cfg(feature = "hdf5")]
mod h5;
mod memory;

#[cfg(feature = "hdf5")]
pub use h5::Hdf5Store;
pub use memory::MemoryStore;

pub trait FieldSource {
    /// Reads the complete field into memory.
    fn load(&self) -> Result<InflowField>;
}

pub trait FieldSink {
    /// Writes the complete field, replacing whatever was stored before.
    fn store(&mut self, field: &InflowField) -> Result<()>;
}
