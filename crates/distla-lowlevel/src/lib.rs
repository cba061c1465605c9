//! Argument marshaling for distributed dense linear algebra routines.
//!
//! PBLAS and ScaLAPACK routines take long positional argument lists built
//! from two recurring patterns: every distributed matrix is passed as
//! `(local, ia, ja, desc)`, and every scratch array as `(work, lwork)`
//! where `lwork` usually has to be obtained from a preliminary size query.
//! This crate lets callers write the short form instead:
//!
//! ```
//! use distla_abi::Descriptor;
//! use distla_lowlevel::{args, Buffer, FlatArg, Lowlevel, MatrixHandle, RoutineFamily,
//!                       RoutineTable, WorkArray, CallOptions};
//!
//! let mut table = RoutineTable::new();
//! table.register("pdsyev", RoutineFamily::Scalapack, |_flat: &[FlatArg]| -> distla_lowlevel::Result<i32> {
//!     // a real routine would answer the query through flat[12] and flat[13]
//!     Ok(0)
//! });
//! let lowlevel = Lowlevel::with_options(table, CallOptions::expanded());
//!
//! let desc = Descriptor::block_cyclic(0, 4, 4, 2, 2, 0, 0, 4);
//! let a = MatrixHandle::new(Buffer::from(vec![0.0f64; 16]), desc);
//! let z = MatrixHandle::new(Buffer::from(vec![0.0f64; 16]), desc);
//! let w = Buffer::from(vec![0.0f64; 4]);
//!
//! let info = lowlevel
//!     .call("pdsyev", args!['V', 'U', 4, &a, &w, &z, WorkArray::from_codes("D").unwrap()])
//!     .unwrap();
//! assert_eq!(info, 0);
//! ```
//!
//! which is expanded to
//! `('V', 'U', 4, a, 1, 1, desca, w, z, 1, 1, descz, work, lwork)` and
//! issued twice: once with `lwork = -1` to learn the size, once for real.
//!
//! The native routines perform no bounds checking and neither does this
//! crate: buffers and descriptors are forwarded exactly as given.

pub use inventory;

pub mod buffer;
pub mod encode;
pub mod error;
pub mod expand;
pub mod invoke;
pub mod matrix;
pub mod registry;
pub mod value;
pub mod workspace;

use std::sync::atomic::{AtomicBool, Ordering};

pub use buffer::{Buffer, BufferData};
pub use distla_abi::{Descriptor, FInt, WorkType};
pub use error::{LowlevelError, Result};
pub use expand::{expand, flatten_raw, ExpandMode, PreparedCall};
pub use invoke::{call_routine, CallOptions, Invoker};
pub use matrix::{DistributedMatrix, MatrixHandle};
pub use registry::{
    native_entries, Lowlevel, NativeEntry, NativeRoutine, RegisteredRoutine, RoutineFamily,
    RoutineTable, Wrapper,
};
pub use value::{Arg, FlatArg, Scalar};
pub use workspace::{WorkArray, WorkPair};

static EXPAND_ARGS: AtomicBool = AtomicBool::new(true);

/// Set the default expansion mode picked up by `CallOptions::default()`.
///
/// Meant to be set once at start-up. Factories and invokers snapshot the
/// value when they are built; changing it later does not affect them.
pub fn set_expand_args(enabled: bool) {
    EXPAND_ARGS.store(enabled, Ordering::Relaxed);
}

pub fn expand_args() -> bool {
    EXPAND_ARGS.load(Ordering::Relaxed)
}
