//! Native binding for the PBLAS, ScaLAPACK and REDIST routines.
//!
//! A [`NativeLibrary`] is loaded once, then [`bind_library`] resolves the
//! declared routines into a [`RoutineTable`](distla_lowlevel::RoutineTable)
//! of [`FortranRoutine`]s ready for [`Lowlevel`](distla_lowlevel::Lowlevel):
//!
//! ```no_run
//! use std::sync::Arc;
//! use distla_ffi::{bind_library, routines, NativeLibrary, SymbolStyle};
//! use distla_lowlevel::Lowlevel;
//!
//! let library = Arc::new(NativeLibrary::load_by_name("scalapack")?);
//! let (table, missing) = bind_library(&library, SymbolStyle::LowerUnderscore, routines::all_routines());
//! println!("{} routines bound, {} missing", table.len(), missing.len());
//! let lowlevel = Lowlevel::new(table);
//! # let _ = lowlevel;
//! # Ok::<(), distla_lowlevel::LowlevelError>(())
//! ```

mod fortran;
mod library;
pub mod routines;

pub use fortran::{bind_library, FortranRoutine, MAX_ARITY};
pub use library::{NativeLibrary, RawFn, SymbolStyle};
pub use routines::{RoutineDecl, StatusSlot};
