//! Fortran ABI types for distla.
//!
//! This crate defines the fixed-layout values shared between
//! `distla-lowlevel` (which builds flat argument lists) and `distla-ffi`
//! (which hands them to a PBLAS/ScaLAPACK library). Nothing here knows
//! about argument expansion; it only pins down widths, sentinels and the
//! descriptor layout the native routines expect.

use std::fmt;

/// Default Fortran `INTEGER` as compiled into the reference ScaLAPACK.
pub type FInt = i32;

/// Length sentinel that turns a routine call into a workspace size query.
pub const QUERY_LENGTH: FInt = -1;

/// Global row/column origin used when a whole distributed matrix is passed.
pub const GLOBAL_ORIGIN: FInt = 1;

/// Number of integers in a dense block-cyclic array descriptor.
pub const DESC_LEN: usize = 9;

/// Descriptor type tag for dense block-cyclic matrices.
pub const BLOCK_CYCLIC_2D: FInt = 1;

// Zero-based offsets into the descriptor block (ScaLAPACK's DTYPE_, CTXT_, ...).
pub const DTYPE_: usize = 0;
pub const CTXT_: usize = 1;
pub const M_: usize = 2;
pub const N_: usize = 3;
pub const MB_: usize = 4;
pub const NB_: usize = 5;
pub const RSRC_: usize = 6;
pub const CSRC_: usize = 7;
pub const LLD_: usize = 8;

/// Array descriptor of a distributed matrix.
///
/// Memory layout matches the Fortran `INTEGER DESC(9)` array, so a pointer
/// to the inner array can be handed to a native routine as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Descriptor(pub [FInt; DESC_LEN]);

impl Descriptor {
    /// Build a block-cyclic descriptor.
    #[allow(clippy::too_many_arguments)]
    pub fn block_cyclic(
        ctxt: FInt,
        m: FInt,
        n: FInt,
        mb: FInt,
        nb: FInt,
        rsrc: FInt,
        csrc: FInt,
        lld: FInt,
    ) -> Self {
        Descriptor([BLOCK_CYCLIC_2D, ctxt, m, n, mb, nb, rsrc, csrc, lld])
    }

    pub fn from_array(raw: [FInt; DESC_LEN]) -> Self {
        Descriptor(raw)
    }

    pub fn as_array(&self) -> &[FInt; DESC_LEN] {
        &self.0
    }

    pub fn dtype(&self) -> FInt {
        self.0[DTYPE_]
    }

    pub fn context(&self) -> FInt {
        self.0[CTXT_]
    }

    /// Global shape `(m, n)`.
    pub fn global_shape(&self) -> (FInt, FInt) {
        (self.0[M_], self.0[N_])
    }

    /// Distribution block shape `(mb, nb)`.
    pub fn block_shape(&self) -> (FInt, FInt) {
        (self.0[MB_], self.0[NB_])
    }

    /// Process row/column holding the first block.
    pub fn source(&self) -> (FInt, FInt) {
        (self.0[RSRC_], self.0[CSRC_])
    }

    pub fn local_leading_dim(&self) -> FInt {
        self.0[LLD_]
    }
}

impl From<[FInt; DESC_LEN]> for Descriptor {
    fn from(raw: [FInt; DESC_LEN]) -> Self {
        Descriptor(raw)
    }
}

/// Element types a workspace buffer can have.
///
/// The single-character codes follow the BLAS precision prefixes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WorkType {
    /// `I`: Fortran `INTEGER`
    Integer32,
    /// `S`: `REAL`
    Float32,
    /// `D`: `DOUBLE PRECISION`
    Float64,
    /// `C`: `COMPLEX`
    Complex64,
    /// `Z`: `COMPLEX*16`
    Complex128,
}

impl WorkType {
    pub const ALL: [WorkType; 5] = [
        WorkType::Integer32,
        WorkType::Float32,
        WorkType::Float64,
        WorkType::Complex64,
        WorkType::Complex128,
    ];

    /// Parse a type code. Lower-case codes are accepted.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'I' => Some(WorkType::Integer32),
            'S' => Some(WorkType::Float32),
            'D' => Some(WorkType::Float64),
            'C' => Some(WorkType::Complex64),
            'Z' => Some(WorkType::Complex128),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            WorkType::Integer32 => 'I',
            WorkType::Float32 => 'S',
            WorkType::Float64 => 'D',
            WorkType::Complex64 => 'C',
            WorkType::Complex128 => 'Z',
        }
    }

    /// Size of one element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            WorkType::Integer32 | WorkType::Float32 => 4,
            WorkType::Float64 | WorkType::Complex64 => 8,
            WorkType::Complex128 => 16,
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, WorkType::Complex64 | WorkType::Complex128)
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// Bumped whenever the descriptor or WorkType layout changes.
pub const DISTLA_ABI_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accessors_follow_scalapack_offsets() {
        let desc = Descriptor::block_cyclic(7, 100, 80, 32, 16, 0, 1, 52);
        assert_eq!(desc.dtype(), BLOCK_CYCLIC_2D);
        assert_eq!(desc.context(), 7);
        assert_eq!(desc.global_shape(), (100, 80));
        assert_eq!(desc.block_shape(), (32, 16));
        assert_eq!(desc.source(), (0, 1));
        assert_eq!(desc.local_leading_dim(), 52);
        assert_eq!(desc.as_array()[LLD_], 52);
    }

    #[test]
    fn descriptor_is_nine_fortran_integers() {
        assert_eq!(
            std::mem::size_of::<Descriptor>(),
            DESC_LEN * std::mem::size_of::<FInt>()
        );
    }

    #[test]
    fn work_type_codes() {
        for ty in WorkType::ALL {
            assert_eq!(WorkType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(WorkType::from_code('z'), Some(WorkType::Complex128));
        assert_eq!(WorkType::from_code('Q'), None);
        assert_eq!(WorkType::Complex128.element_size(), 16);
        assert!(WorkType::Complex64.is_complex());
        assert!(!WorkType::Float64.is_complex());
    }
}
