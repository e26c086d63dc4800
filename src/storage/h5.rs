use hdf5_sys::{
    h5::hsize_t,
    h5d::{H5Dclose, H5Dcreate2, H5Dwrite},
    h5p::H5P_DEFAULT,
    h5s::{H5Sclose, H5Screate_simple, H5S_ALL},
    h5t::{H5T_IEEE_F64BE, H5T_NATIVE_DOUBLE},
};
use ndarray::{ArrayView, Dimension};
use std::{
    ffi::CString,
    os::raw::c_int,
    path::{Path, PathBuf},
    ptr,
};
use tracing::debug;

use super::{FieldSink, FieldSource};
use crate::{
    field::InflowField,
    utils::{CorrectionError, Result, DATASET_U, DATASET_UMEAN, DATASET_V, DATASET_W},
};

/// HDF5 file with the datasets `U`, `V`, `W` (`n_points x n_times`) and
/// `UMEAN` (`n_points`).
#[derive(Debug, Clone)]
pub struct Hdf5Store {
    path: PathBuf,
}

impl Hdf5Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_dataset(&self, file: &hdf5::File, name: &str, ndim: usize) -> Result<hdf5::Dataset> {
        let dataset = file.dataset(name).map_err(|e| {
            CorrectionError::Storage(format!(
                "dataset '{}' missing from {}: {}",
                name,
                self.path.display(),
                e
            ))
        })?;
        if dataset.ndim() != ndim {
            return Err(CorrectionError::ShapeMismatch(format!(
                "dataset '{}' has shape {:?}, expected {} dimensions",
                name,
                dataset.shape(),
                ndim
            )));
        }
        Ok(dataset)
    }
}

impl FieldSource for Hdf5Store {
    fn load(&self) -> Result<InflowField> {
        if !self.path.exists() {
            return Err(CorrectionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", self.path.display()),
            )));
        }
        let file = hdf5::File::open(&self.path)?;

        let u = self.open_dataset(&file, DATASET_U, 2)?.read_2d::<f64>()?;
        let v = self.open_dataset(&file, DATASET_V, 2)?.read_2d::<f64>()?;
        let w = self.open_dataset(&file, DATASET_W, 2)?.read_2d::<f64>()?;
        let u_mean = self.open_dataset(&file, DATASET_UMEAN, 1)?.read_1d::<f64>()?;
        debug!(
            "Read U {:?}, UMEAN {:?} from {}",
            u.dim(),
            u_mean.dim(),
            self.path.display()
        );

        InflowField::new(u, v, w, u_mean)
    }
}

impl FieldSink for Hdf5Store {
    fn store(&mut self, field: &InflowField) -> Result<()> {
        let file = hdf5::File::create(&self.path)?;

        write_dataset(&file, DATASET_U, field.u())?;
        write_dataset(&file, DATASET_V, field.v())?;
        write_dataset(&file, DATASET_W, field.w())?;
        write_dataset(&file, DATASET_UMEAN, field.u_mean())?;

        file.flush()?;
        debug!("Wrote {:?} field to {}", field.shape(), self.path.display());
        Ok(())
    }
}

/// Writes `data` as a big-endian IEEE f64 dataset; HDF5 converts from the
/// native in-memory doubles.
fn write_dataset<D: Dimension>(
    file: &hdf5::File,
    name: &str,
    data: ArrayView<'_, f64, D>,
) -> Result<()> {
    let data = data.as_standard_layout();
    let dims: Vec<hsize_t> = data.shape().iter().map(|&n| n as hsize_t).collect();
    let c_name = CString::new(name)
        .map_err(|e| CorrectionError::Storage(format!("dataset name '{}': {}", name, e)))?;

    unsafe {
        let space = H5Screate_simple(dims.len() as c_int, dims.as_ptr(), ptr::null());
        if space < 0 {
            return Err(CorrectionError::Storage(format!(
                "cannot create dataspace {:?} for '{}'",
                dims, name
            )));
        }

        let dataset = H5Dcreate2(
            file.id(),
            c_name.as_ptr(),
            *H5T_IEEE_F64BE,
            space,
            H5P_DEFAULT,
            H5P_DEFAULT,
            H5P_DEFAULT,
        );
        H5Sclose(space);
        if dataset < 0 {
            return Err(CorrectionError::Storage(format!(
                "cannot create dataset '{}'",
                name
            )));
        }

        let status = H5Dwrite(
            dataset,
            *H5T_NATIVE_DOUBLE,
            H5S_ALL,
            H5S_ALL,
            H5P_DEFAULT,
            data.as_ptr().cast(),
        );
        H5Dclose(dataset);
        if status < 0 {
            return Err(CorrectionError::Storage(format!(
                "cannot write dataset '{}'",
                name
            )));
        }
    }

    Ok(())
}
