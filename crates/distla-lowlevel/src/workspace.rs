//! Workspace arrays and the query/compute lifecycle.
//!
//! Most ScaLAPACK drivers take one or more `(work, lwork)` pairs whose
//! minimal size depends on the problem and the process grid. Calling the
//! routine with `lwork = -1` makes it write the required size into
//! `work[0]` instead of computing. A [`WorkArray`] stands in for all of a
//! routine's pairs at once: it expands to length-1 query buffers on the
//! first call and to freshly allocated arrays of the reported sizes on the
//! second.

use crate::buffer::Buffer;
use crate::error::{LowlevelError, Result};
use crate::value::FlatArg;
use distla_abi::{FInt, WorkType, QUERY_LENGTH};

/// One `(buffer, length)` argument pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkPair {
    pub buffer: Buffer,
    pub length: FInt,
}

impl WorkPair {
    pub fn into_flat(self) -> [FlatArg; 2] {
        [FlatArg::Buffer(self.buffer), FlatArg::int(self.length)]
    }
}

/// Placeholder for the workspace arguments of a single routine call.
///
/// Types are listed in the order the routine takes its work arrays, e.g.
/// `WorkArray::from_codes("ZDI")` for `pzheevd`'s `work, rwork, iwork`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkArray {
    types: Vec<WorkType>,
    query: Option<Vec<Buffer>>,
}

impl WorkArray {
    pub fn new(types: impl IntoIterator<Item = WorkType>) -> Self {
        Self {
            types: types.into_iter().collect(),
            query: None,
        }
    }

    /// Parse single-character type codes; whitespace and commas are ignored.
    pub fn from_codes(codes: &str) -> Result<Self> {
        let types = codes
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| WorkType::from_code(c).ok_or(LowlevelError::UnknownWorkType(c)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(types))
    }

    pub fn types(&self) -> &[WorkType] {
        &self.types
    }

    pub fn is_queried(&self) -> bool {
        self.query.is_some()
    }

    /// The length-1 buffers the last query wrote its answers into.
    pub fn query_buffers(&self) -> Option<&[Buffer]> {
        self.query.as_deref()
    }

    /// Allocate fresh length-1 query buffers and return `(buffer, -1)` pairs.
    ///
    /// Any previous query result is discarded.
    pub fn to_query(&mut self) -> Vec<WorkPair> {
        let buffers: Vec<Buffer> = self.types.iter().map(|ty| Buffer::zeros(*ty, 1)).collect();
        let pairs = buffers
            .iter()
            .map(|buffer| WorkPair {
                buffer: buffer.clone(),
                length: QUERY_LENGTH,
            })
            .collect();
        self.query = Some(buffers);
        pairs
    }

    /// Lengths reported by the last query, one per type.
    pub fn queried_lengths(&self) -> Result<Vec<FInt>> {
        let buffers = self.query.as_ref().ok_or(LowlevelError::InvalidState)?;
        buffers
            .iter()
            .zip(&self.types)
            .map(|(buffer, ty)| {
                let value = buffer.read().leading_value().unwrap_or(0.0);
                workspace_length(*ty, value)
            })
            .collect()
    }

    /// Allocate the work arrays at their queried sizes.
    ///
    /// Fresh arrays are returned on every call; nothing is cached.
    pub fn to_compute(&self) -> Result<Vec<WorkPair>> {
        let lengths = self.queried_lengths()?;
        Ok(self
            .types
            .iter()
            .zip(lengths)
            .map(|(ty, length)| WorkPair {
                buffer: Buffer::zeros(*ty, length as usize),
                length,
            })
            .collect())
    }
}

// Floating-point answers are truncated toward zero, as the integer
// conversion in the reference drivers does.
fn workspace_length(work_type: WorkType, value: f64) -> Result<FInt> {
    if !value.is_finite() || value < 0.0 || value.trunc() > FInt::MAX as f64 {
        return Err(LowlevelError::InvalidWorkLength { work_type, value });
    }
    Ok(value.trunc() as FInt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferData;

    fn answer_query(work: &WorkArray, sizes: &[f64]) {
        for (buffer, size) in work.query_buffers().unwrap().iter().zip(sizes) {
            buffer.write().set_leading_value(*size);
        }
    }

    #[test]
    fn from_codes_keeps_order() {
        let work = WorkArray::from_codes("Z, D, I").unwrap();
        assert_eq!(
            work.types(),
            &[WorkType::Complex128, WorkType::Float64, WorkType::Integer32]
        );
        assert_eq!(
            WorkArray::from_codes("DX").unwrap_err(),
            LowlevelError::UnknownWorkType('X')
        );
    }

    #[test]
    fn compute_before_query_is_invalid_state() {
        for codes in ["", "I", "SDCZ"] {
            let work = WorkArray::from_codes(codes).unwrap();
            assert_eq!(work.to_compute().unwrap_err(), LowlevelError::InvalidState);
        }
    }

    #[test]
    fn query_pairs_are_length_one_with_sentinel() {
        let mut work = WorkArray::from_codes("DI").unwrap();
        let pairs = work.to_query();
        assert_eq!(pairs.len(), 2);
        for (pair, ty) in pairs.iter().zip(work.types()) {
            assert_eq!(pair.length, QUERY_LENGTH);
            assert_eq!(pair.buffer.len(), 1);
            assert_eq!(pair.buffer.work_type(), *ty);
        }
        assert!(work.is_queried());
    }

    #[test]
    fn compute_uses_reported_lengths() {
        let mut work = WorkArray::from_codes("ZDI").unwrap();
        work.to_query();
        answer_query(&work, &[500.0, 200.0, 50.0]);

        let pairs = work.to_compute().unwrap();
        let lengths: Vec<FInt> = pairs.iter().map(|p| p.length).collect();
        assert_eq!(lengths, vec![500, 200, 50]);
        assert_eq!(pairs[0].buffer.len(), 500);
        assert_eq!(pairs[0].buffer.work_type(), WorkType::Complex128);

        // materialised arrays are new each time
        let again = work.to_compute().unwrap();
        assert!(!again[0].buffer.ptr_eq(&pairs[0].buffer));
    }

    #[test]
    fn fractional_sizes_truncate() {
        let mut work = WorkArray::from_codes("S").unwrap();
        work.to_query();
        answer_query(&work, &[12.9]);
        assert_eq!(work.queried_lengths().unwrap(), vec![12]);
    }

    #[test]
    fn negative_or_nan_sizes_are_rejected() {
        let mut work = WorkArray::from_codes("D").unwrap();
        work.to_query();
        answer_query(&work, &[-3.0]);
        assert!(matches!(
            work.to_compute(),
            Err(LowlevelError::InvalidWorkLength { .. })
        ));

        *work.query_buffers().unwrap()[0].write() = BufferData::F64(vec![f64::NAN]);
        assert!(work.queried_lengths().is_err());
    }

    #[test]
    fn requery_replaces_buffers() {
        let mut work = WorkArray::from_codes("I").unwrap();
        let first = work.to_query();
        let second = work.to_query();
        assert!(!first[0].buffer.ptr_eq(&second[0].buffer));
        assert!(work.query_buffers().unwrap()[0].ptr_eq(&second[0].buffer));
    }
}
