//! The two-phase query/compute call protocol.

use crate::error::Result;
use crate::expand::{flatten_raw, ExpandMode, PreparedCall};
use crate::registry::NativeRoutine;
use crate::value::Arg;
use distla_abi::FInt;
use log::{debug, trace, warn};

/// Per-invoker call settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOptions {
    /// Expand matrices, text and work arrays. When false, arguments are
    /// only flattened and must already be in native form.
    pub expand_args: bool,
}

impl CallOptions {
    pub fn expanded() -> Self {
        Self { expand_args: true }
    }

    pub fn raw() -> Self {
        Self { expand_args: false }
    }
}

impl Default for CallOptions {
    /// Takes the process-wide default set with [`crate::set_expand_args`].
    fn default() -> Self {
        Self {
            expand_args: crate::expand_args(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker {
    options: CallOptions,
}

impl Invoker {
    pub fn new(options: CallOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CallOptions {
        self.options
    }

    pub fn invoke(&self, name: &str, routine: &dyn NativeRoutine, args: Vec<Arg>) -> Result<FInt> {
        if self.options.expand_args {
            return call_routine(name, routine, args);
        }
        let flat = flatten_raw(args);
        debug!("{name}: raw call with {} arguments", flat.len());
        routine.call(&flat)
    }
}

/// Call `routine`, running a workspace query first if `args` holds any
/// `WorkArray`.
///
/// Matrix and text expansion happen before the first native call, so
/// encoding errors never reach the native side. One query call answers
/// for every work array in the list. Returns the status of the last call.
pub fn call_routine(name: &str, routine: &dyn NativeRoutine, args: Vec<Arg>) -> Result<FInt> {
    let needs_query = args.iter().any(Arg::contains_work);
    let mut call = PreparedCall::prepare(args)?;

    if needs_query {
        let query = call.flatten(ExpandMode::Query)?;
        debug!("{name}: workspace query with {} arguments", query.len());
        let status = routine.call(&query)?;
        if status != 0 {
            warn!("{name}: workspace query returned status {status}");
        }
        for work in call.work_arrays() {
            trace!("{name}: queried workspace {:?}", work.queried_lengths());
        }
    }

    let compute = call.flatten(ExpandMode::Compute)?;
    debug!("{name}: compute call with {} arguments", compute.len());
    let status = routine.call(&compute)?;
    trace!("{name}: returned status {status}");
    Ok(status)
}
