//! Logical argument lists to flat native argument lists.
//!
//! Expansion runs in three fixed stages over the whole list:
//!
//! 1. distributed matrices become `(local, 1, 1, desc)` groups,
//! 2. text becomes ASCII bytes,
//! 3. work arrays become `(buffer, length)` pairs for the requested mode.
//!
//! Groups stay nested until the final flattening so that each logical
//! argument keeps its position while the stages run.

use crate::encode::encode_strings;
use crate::error::Result;
use crate::value::{Arg, FlatArg};
use crate::workspace::WorkArray;

/// Which of the two native calls an argument list is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Workspace size query: work arrays expand to `(buffer[1], -1)`.
    Query,
    /// Real computation: work arrays expand to `(buffer[n], n)`.
    Compute,
}

#[derive(Debug)]
pub(crate) enum Staged {
    Flat(FlatArg),
    Text { position: usize, text: String },
    Group(Vec<Staged>),
    Work(WorkArray),
}

/// An argument list with matrices and text already expanded.
///
/// Work arrays are kept so that the same list can be flattened once for
/// the query call and once for the compute call.
#[derive(Debug)]
pub struct PreparedCall {
    staged: Vec<Staged>,
}

impl PreparedCall {
    /// Run the matrix and text stages. Fails before anything is flattened.
    pub fn prepare(args: Vec<Arg>) -> Result<Self> {
        let staged = expand_matrices(args);
        let staged = encode_strings(staged)?;
        Ok(Self { staged })
    }

    pub fn needs_workspace_query(&self) -> bool {
        self.staged.iter().any(Staged::contains_work)
    }

    /// Expand work arrays for `mode` and flatten.
    ///
    /// `Query` (re)allocates each work array's query buffers; `Compute`
    /// fails with `InvalidState` for any work array that was never queried.
    pub fn flatten(&mut self, mode: ExpandMode) -> Result<Vec<FlatArg>> {
        let mut flat = Vec::with_capacity(self.staged.len());
        for item in &mut self.staged {
            item.flatten_into(mode, &mut flat)?;
        }
        Ok(flat)
    }

    /// Work arrays in argument order.
    pub fn work_arrays(&self) -> Vec<&WorkArray> {
        let mut out = Vec::new();
        for item in &self.staged {
            item.collect_work(&mut out);
        }
        out
    }
}

impl Staged {
    fn contains_work(&self) -> bool {
        match self {
            Staged::Work(_) => true,
            Staged::Group(items) => items.iter().any(Staged::contains_work),
            Staged::Flat(_) | Staged::Text { .. } => false,
        }
    }

    fn collect_work<'a>(&'a self, out: &mut Vec<&'a WorkArray>) {
        match self {
            Staged::Work(work) => out.push(work),
            Staged::Group(items) => items.iter().for_each(|item| item.collect_work(out)),
            Staged::Flat(_) | Staged::Text { .. } => {}
        }
    }

    fn flatten_into(&mut self, mode: ExpandMode, out: &mut Vec<FlatArg>) -> Result<()> {
        match self {
            Staged::Flat(arg) => out.push(arg.clone()),
            // Only reachable if the text stage was skipped; keep the value opaque.
            Staged::Text { text, .. } => out.push(FlatArg::Opaque(Box::new(Arg::Text(text.clone())))),
            Staged::Group(items) => {
                for item in items {
                    item.flatten_into(mode, out)?;
                }
            }
            Staged::Work(work) => {
                let pairs = match mode {
                    ExpandMode::Query => work.to_query(),
                    ExpandMode::Compute => work.to_compute()?,
                };
                out.extend(pairs.into_iter().flat_map(|pair| pair.into_flat()));
            }
        }
        Ok(())
    }
}

pub(crate) fn expand_matrices(args: Vec<Arg>) -> Vec<Staged> {
    args.into_iter()
        .enumerate()
        .map(|(position, arg)| stage(position, arg))
        .collect()
}

fn stage(position: usize, arg: Arg) -> Staged {
    match arg {
        Arg::Matrix(m) => Staged::Group(m.expand().into_iter().map(Staged::Flat).collect()),
        Arg::Seq(items) => Staged::Group(items.into_iter().map(|a| stage(position, a)).collect()),
        Arg::Text(text) => Staged::Text { position, text },
        Arg::Work(work) => Staged::Work(work),
        Arg::Scalar(s) => Staged::Flat(FlatArg::Scalar(s)),
        Arg::Buffer(b) => Staged::Flat(FlatArg::Buffer(b)),
        Arg::Bytes(b) => Staged::Flat(FlatArg::Bytes(b)),
        Arg::Descriptor(d) => Staged::Flat(FlatArg::Descriptor(d)),
    }
}

/// One-shot expansion of `args` for `mode`.
///
/// With `Compute`, work arrays must already have been queried; a fresh
/// `WorkArray` therefore fails with `InvalidState`.
pub fn expand(args: Vec<Arg>, mode: ExpandMode) -> Result<Vec<FlatArg>> {
    PreparedCall::prepare(args)?.flatten(mode)
}

/// Flatten without expanding anything.
///
/// Sequences are spliced in place; matrices, work arrays and text are
/// forwarded as opaque values for the native side to reject.
pub fn flatten_raw(args: Vec<Arg>) -> Vec<FlatArg> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        flatten_raw_into(arg, &mut out);
    }
    out
}

fn flatten_raw_into(arg: Arg, out: &mut Vec<FlatArg>) {
    match arg {
        Arg::Seq(items) => items.into_iter().for_each(|a| flatten_raw_into(a, out)),
        Arg::Scalar(s) => out.push(FlatArg::Scalar(s)),
        Arg::Buffer(b) => out.push(FlatArg::Buffer(b)),
        Arg::Bytes(b) => out.push(FlatArg::Bytes(b)),
        Arg::Descriptor(d) => out.push(FlatArg::Descriptor(d)),
        opaque @ (Arg::Matrix(_) | Arg::Work(_) | Arg::Text(_)) => {
            out.push(FlatArg::Opaque(Box::new(opaque)))
        }
    }
}
