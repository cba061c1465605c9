//! Routine registration and the wrapper factory.
//!
//! Routines get into a [`RoutineTable`] in one of two ways:
//!
//! - Rust functions annotated with `#[lowlevel_routine]` are collected at
//!   link time through `inventory` and picked up by
//!   [`RoutineTable::from_inventory`];
//! - anything else (typically Fortran symbols resolved from a loaded
//!   library) is added with [`RoutineTable::register`].
//!
//! [`Lowlevel`] turns a table into callable [`Wrapper`]s, one per name.

use crate::error::{LowlevelError, Result};
use crate::invoke::{CallOptions, Invoker};
use crate::value::{Arg, FlatArg};
use distla_abi::FInt;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A native entry point taking a flat positional argument list.
pub trait NativeRoutine: Send + Sync {
    /// Run the routine and return its status/info code.
    fn call(&self, args: &[FlatArg]) -> Result<FInt>;
}

impl<F> NativeRoutine for F
where
    F: Fn(&[FlatArg]) -> Result<FInt> + Send + Sync,
{
    fn call(&self, args: &[FlatArg]) -> Result<FInt> {
        self(args)
    }
}

/// Library a routine belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoutineFamily {
    /// Parallel BLAS
    Pblas,
    Scalapack,
    /// Matrix redistribution (`p?gemr2d`, `p?trmr2d`)
    Redist,
}

impl RoutineFamily {
    pub const ALL: [RoutineFamily; 3] = [
        RoutineFamily::Pblas,
        RoutineFamily::Scalapack,
        RoutineFamily::Redist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoutineFamily::Pblas => "pblas",
            RoutineFamily::Scalapack => "scalapack",
            RoutineFamily::Redist => "redist",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pblas" => Some(RoutineFamily::Pblas),
            "scalapack" | "scl" => Some(RoutineFamily::Scalapack),
            "redist" => Some(RoutineFamily::Redist),
            _ => None,
        }
    }
}

impl fmt::Display for RoutineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link-time registration record emitted by `#[lowlevel_routine]`.
#[derive(Debug, Clone, Copy)]
pub struct NativeEntry {
    pub name: &'static str,
    pub family: RoutineFamily,
    pub doc: &'static str,
    pub routine: fn(&[FlatArg]) -> Result<FInt>,
}

impl NativeEntry {
    pub const fn new(
        name: &'static str,
        family: RoutineFamily,
        doc: &'static str,
        routine: fn(&[FlatArg]) -> Result<FInt>,
    ) -> Self {
        Self {
            name,
            family,
            doc,
            routine,
        }
    }
}

inventory::collect!(NativeEntry);

pub fn native_entries() -> Vec<&'static NativeEntry> {
    inventory::iter::<NativeEntry>().collect()
}

#[derive(Clone)]
pub struct RegisteredRoutine {
    name: String,
    family: RoutineFamily,
    doc: String,
    routine: Arc<dyn NativeRoutine>,
}

impl RegisteredRoutine {
    pub fn new(
        name: impl Into<String>,
        family: RoutineFamily,
        routine: Arc<dyn NativeRoutine>,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            doc: String::new(),
            routine,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> RoutineFamily {
        self.family
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn routine(&self) -> &Arc<dyn NativeRoutine> {
        &self.routine
    }
}

impl fmt::Debug for RegisteredRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRoutine")
            .field("name", &self.name)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Name → routine table, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct RoutineTable {
    routines: BTreeMap<String, RegisteredRoutine>,
}

impl RoutineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every `#[lowlevel_routine]` linked into the binary.
    pub fn from_inventory() -> Self {
        let mut table = Self::new();
        table.extend_from_inventory();
        table
    }

    pub fn extend_from_inventory(&mut self) {
        for entry in native_entries() {
            let routine = RegisteredRoutine::new(entry.name, entry.family, Arc::new(entry.routine))
                .with_doc(entry.doc.trim());
            self.insert(routine);
        }
    }

    /// Register `routine` under `name`, returning whatever it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        family: RoutineFamily,
        routine: impl NativeRoutine + 'static,
    ) -> Option<RegisteredRoutine> {
        self.insert(RegisteredRoutine::new(name, family, Arc::new(routine)))
    }

    pub fn insert(&mut self, routine: RegisteredRoutine) -> Option<RegisteredRoutine> {
        self.routines.insert(routine.name.clone(), routine)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredRoutine> {
        self.routines.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routines.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.routines.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredRoutine> + '_ {
        self.routines.values()
    }

    pub fn family(&self, family: RoutineFamily) -> impl Iterator<Item = &RegisteredRoutine> + '_ {
        self.iter().filter(move |r| r.family == family)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

impl Extend<RegisteredRoutine> for RoutineTable {
    fn extend<T: IntoIterator<Item = RegisteredRoutine>>(&mut self, iter: T) {
        for routine in iter {
            self.insert(routine);
        }
    }
}

/// Wrapper factory over a routine table.
///
/// The expand/raw setting is fixed when the factory is built and shared
/// by every wrapper it hands out.
#[derive(Debug, Clone)]
pub struct Lowlevel {
    table: Arc<RoutineTable>,
    invoker: Invoker,
}

impl Lowlevel {
    /// Factory using the process-wide default expansion setting.
    pub fn new(table: RoutineTable) -> Self {
        Self::with_options(table, CallOptions::default())
    }

    pub fn with_options(table: RoutineTable, options: CallOptions) -> Self {
        Self {
            table: Arc::new(table),
            invoker: Invoker::new(options),
        }
    }

    pub fn options(&self) -> CallOptions {
        self.invoker.options()
    }

    pub fn table(&self) -> &RoutineTable {
        &self.table
    }

    pub fn wrapper(&self, name: &str) -> Option<Wrapper> {
        self.table.get(name).map(|r| self.wrap(r))
    }

    pub fn wrappers(&self) -> impl Iterator<Item = Wrapper> + '_ {
        self.table.iter().map(|r| self.wrap(r))
    }

    /// Look up `name` and call it.
    pub fn call(&self, name: &str, args: Vec<Arg>) -> Result<FInt> {
        let routine = self
            .table
            .get(name)
            .ok_or_else(|| LowlevelError::UnknownRoutine(name.to_string()))?;
        self.invoker.invoke(name, routine.routine.as_ref(), args)
    }

    fn wrap(&self, routine: &RegisteredRoutine) -> Wrapper {
        Wrapper {
            routine: routine.clone(),
            invoker: self.invoker,
        }
    }
}

/// A named, callable routine.
#[derive(Debug, Clone)]
pub struct Wrapper {
    routine: RegisteredRoutine,
    invoker: Invoker,
}

impl Wrapper {
    pub fn name(&self) -> &str {
        self.routine.name()
    }

    pub fn family(&self) -> RoutineFamily {
        self.routine.family()
    }

    pub fn doc(&self) -> &str {
        self.routine.doc()
    }

    pub fn options(&self) -> CallOptions {
        self.invoker.options()
    }

    pub fn call(&self, args: Vec<Arg>) -> Result<FInt> {
        self.invoker
            .invoke(self.routine.name(), self.routine.routine.as_ref(), args)
    }
}
