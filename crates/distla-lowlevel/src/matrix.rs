//! The distributed-matrix collaborator interface.
//!
//! Storage and distribution of matrices live outside this crate. All the
//! expander needs from a distributed matrix is its local block and its
//! descriptor, and it never looks inside either.

use crate::buffer::Buffer;
use crate::value::FlatArg;
use distla_abi::{Descriptor, GLOBAL_ORIGIN};

/// Anything that can be handed to a routine as a whole distributed matrix.
pub trait DistributedMatrix {
    /// Handle to this process's local block.
    fn local_buffer(&self) -> Buffer;
    fn descriptor(&self) -> Descriptor;
}

/// Snapshot of a distributed matrix taken when it is put in an argument list.
///
/// The local buffer is shared with the matrix it came from, so results the
/// routine writes into it land in the caller's matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixHandle {
    local: Buffer,
    desc: Descriptor,
}

impl MatrixHandle {
    pub fn new(local: Buffer, desc: Descriptor) -> Self {
        Self { local, desc }
    }

    pub fn of<M: DistributedMatrix + ?Sized>(m: &M) -> Self {
        Self::new(m.local_buffer(), m.descriptor())
    }

    pub fn local(&self) -> &Buffer {
        &self.local
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }

    /// `(local, 1, 1, desc)`: the whole matrix starting at its global origin.
    pub fn expand(&self) -> [FlatArg; 4] {
        [
            FlatArg::Buffer(self.local.clone()),
            FlatArg::int(GLOBAL_ORIGIN),
            FlatArg::int(GLOBAL_ORIGIN),
            FlatArg::Descriptor(self.desc),
        ]
    }
}

impl DistributedMatrix for MatrixHandle {
    fn local_buffer(&self) -> Buffer {
        self.local.clone()
    }

    fn descriptor(&self) -> Descriptor {
        self.desc
    }
}
