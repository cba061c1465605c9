//! Shared, typed array handles.
//!
//! A [`Buffer`] is what ends up behind every array argument of a native
//! routine: caller-owned outputs such as eigenvalue vectors, the local
//! block of a distributed matrix, and the scratch arrays a `WorkArray`
//! allocates. Handles are cheap to clone and all clones see the same
//! storage, so results written by the native side are visible to the
//! caller after the call returns.

use distla_abi::WorkType;
use num_complex::{Complex32, Complex64};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::ffi::c_void;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex32>),
    C128(Vec<Complex64>),
}

impl BufferData {
    pub fn zeros(work_type: WorkType, len: usize) -> Self {
        match work_type {
            WorkType::Integer32 => BufferData::I32(vec![0; len]),
            WorkType::Float32 => BufferData::F32(vec![0.0; len]),
            WorkType::Float64 => BufferData::F64(vec![0.0; len]),
            WorkType::Complex64 => BufferData::C64(vec![Complex32::new(0.0, 0.0); len]),
            WorkType::Complex128 => BufferData::C128(vec![Complex64::new(0.0, 0.0); len]),
        }
    }

    pub fn work_type(&self) -> WorkType {
        match self {
            BufferData::I32(_) => WorkType::Integer32,
            BufferData::F32(_) => WorkType::Float32,
            BufferData::F64(_) => WorkType::Float64,
            BufferData::C64(_) => WorkType::Complex64,
            BufferData::C128(_) => WorkType::Complex128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BufferData::I32(v) => v.len(),
            BufferData::F32(v) => v.len(),
            BufferData::F64(v) => v.len(),
            BufferData::C64(v) => v.len(),
            BufferData::C128(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First element as a real number (real part for complex buffers).
    ///
    /// This is how workspace queries report sizes.
    pub fn leading_value(&self) -> Option<f64> {
        match self {
            BufferData::I32(v) => v.first().map(|x| *x as f64),
            BufferData::F32(v) => v.first().map(|x| *x as f64),
            BufferData::F64(v) => v.first().copied(),
            BufferData::C64(v) => v.first().map(|x| x.re as f64),
            BufferData::C128(v) => v.first().map(|x| x.re),
        }
    }

    /// Overwrite element 0 with `value` (real part for complex buffers).
    ///
    /// Mostly useful for native stand-ins that answer a workspace query.
    pub fn set_leading_value(&mut self, value: f64) {
        match self {
            BufferData::I32(v) => {
                if let Some(x) = v.first_mut() {
                    *x = value as i32;
                }
            }
            BufferData::F32(v) => {
                if let Some(x) = v.first_mut() {
                    *x = value as f32;
                }
            }
            BufferData::F64(v) => {
                if let Some(x) = v.first_mut() {
                    *x = value;
                }
            }
            BufferData::C64(v) => {
                if let Some(x) = v.first_mut() {
                    *x = Complex32::new(value as f32, 0.0);
                }
            }
            BufferData::C128(v) => {
                if let Some(x) = v.first_mut() {
                    *x = Complex64::new(value, 0.0);
                }
            }
        }
    }

    /// Raw pointer to the first element, for the native call boundary.
    pub fn as_mut_ptr(&mut self) -> *mut c_void {
        match self {
            BufferData::I32(v) => v.as_mut_ptr().cast(),
            BufferData::F32(v) => v.as_mut_ptr().cast(),
            BufferData::F64(v) => v.as_mut_ptr().cast(),
            BufferData::C64(v) => v.as_mut_ptr().cast(),
            BufferData::C128(v) => v.as_mut_ptr().cast(),
        }
    }
}

/// Shared handle to a typed array.
#[derive(Clone)]
pub struct Buffer(Arc<RwLock<BufferData>>);

impl Buffer {
    pub fn new(data: BufferData) -> Self {
        Buffer(Arc::new(RwLock::new(data)))
    }

    pub fn zeros(work_type: WorkType, len: usize) -> Self {
        Self::new(BufferData::zeros(work_type, len))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, BufferData> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, BufferData> {
        self.0.write()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn work_type(&self) -> WorkType {
        self.read().work_type()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BufferData {
        self.read().clone()
    }

    /// True if both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.read() == *other.read()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.read();
        write!(f, "Buffer({}[{}])", data.work_type(), data.len())
    }
}

impl From<BufferData> for Buffer {
    fn from(data: BufferData) -> Self {
        Buffer::new(data)
    }
}

macro_rules! buffer_from_vec {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$elem>> for Buffer {
                fn from(v: Vec<$elem>) -> Self {
                    Buffer::new(BufferData::$variant(v))
                }
            }
        )*
    };
}

buffer_from_vec!(
    i32 => I32,
    f32 => F32,
    f64 => F64,
    Complex32 => C64,
    Complex64 => C128,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = Buffer::from(vec![1.0f64, 2.0, 3.0]);
        let b = a.clone();
        if let BufferData::F64(v) = &mut *b.write() {
            v[1] = 20.0;
        }
        assert_eq!(a.snapshot(), BufferData::F64(vec![1.0, 20.0, 3.0]));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Buffer::from(vec![1.0f64, 20.0, 3.0])));
    }

    #[test]
    fn leading_value_uses_real_part() {
        let mut data = BufferData::zeros(WorkType::Complex128, 1);
        data.set_leading_value(512.0);
        assert_eq!(data.leading_value(), Some(512.0));
        if let BufferData::C128(v) = &data {
            assert_eq!(v[0].im, 0.0);
        }

        let data = BufferData::C64(vec![Complex32::new(7.0, 99.0)]);
        assert_eq!(data.leading_value(), Some(7.0));
        assert_eq!(BufferData::I32(vec![]).leading_value(), None);
    }

    #[test]
    fn zeros_has_requested_type_and_length() {
        for ty in WorkType::ALL {
            let buf = Buffer::zeros(ty, 4);
            assert_eq!(buf.work_type(), ty);
            assert_eq!(buf.len(), 4);
        }
        assert!(Buffer::zeros(WorkType::Float32, 0).is_empty());
    }
}
