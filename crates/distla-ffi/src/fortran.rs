//! Calling Fortran routines with a flat argument list.
//!
//! Fortran passes every argument by reference. Scalars and descriptors are
//! copied into owned cells, buffers are passed in place, character
//! arguments are followed (after all regular arguments) by their lengths,
//! passed by value as gfortran does.

use std::ffi::c_void;
use std::sync::Arc;

use distla_abi::FInt;
use distla_lowlevel::{
    Buffer, BufferData, FlatArg, LowlevelError, NativeRoutine, RegisteredRoutine, Result,
    RoutineTable, Scalar,
};
use log::{debug, warn};
use parking_lot::RwLockWriteGuard;

use crate::library::{NativeLibrary, RawFn, SymbolStyle};
use crate::routines::{RoutineDecl, StatusSlot};

/// Most pointer-sized arguments a single call may pass, hidden lengths and
/// `INFO` included.
pub const MAX_ARITY: usize = 48;

type Ptr = *mut c_void;

/// A Fortran subroutine resolved from a loaded library.
pub struct FortranRoutine {
    name: String,
    symbol: String,
    status: StatusSlot,
    func: RawFn,
    // keeps `func` mapped; `None` for routines linked into the process
    _library: Option<Arc<NativeLibrary>>,
}

impl FortranRoutine {
    pub fn resolve(
        library: &Arc<NativeLibrary>,
        style: SymbolStyle,
        decl: &RoutineDecl,
    ) -> Result<Self> {
        let symbol = style.symbol_name(decl.name);
        let func = unsafe { library.raw_symbol(&symbol)? };
        Ok(Self {
            name: decl.name.to_string(),
            symbol,
            status: decl.status,
            func,
            _library: Some(library.clone()),
        })
    }

    /// Wrap a routine already linked into the process.
    ///
    /// # Safety
    ///
    /// `func` must be a Fortran subroutine that stays callable for the
    /// lifetime of the returned value.
    pub(crate) unsafe fn from_raw(name: &str, func: RawFn, status: StatusSlot) -> Self {
        Self {
            name: name.to_string(),
            symbol: name.to_string(),
            status,
            func,
            _library: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn status_slot(&self) -> StatusSlot {
        self.status
    }
}

impl std::fmt::Debug for FortranRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortranRoutine")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("status", &self.status)
            .finish()
    }
}

impl NativeRoutine for FortranRoutine {
    fn call(&self, args: &[FlatArg]) -> Result<FInt> {
        let mut frame = Frame::marshal(&self.name, args, self.status)?;
        let ptrs = frame.pointers();
        unsafe { dispatch(&self.name, self.func, &ptrs)? };
        Ok(frame.status())
    }
}

enum Slot {
    Cell(usize),
    Shared(usize),
    Chars(usize),
}

/// Storage backing one native call.
pub(crate) struct Frame<'a> {
    slots: Vec<Slot>,
    cells: Vec<BufferData>,
    chars: Vec<Vec<u8>>,
    guards: Vec<RwLockWriteGuard<'a, BufferData>>,
    info: Option<usize>,
}

impl<'a> Frame<'a> {
    pub(crate) fn marshal(routine: &str, args: &'a [FlatArg], status: StatusSlot) -> Result<Self> {
        let mut slots = Vec::with_capacity(args.len() + 1);
        let mut cells = Vec::new();
        let mut chars = Vec::new();
        let mut shared: Vec<&'a Buffer> = Vec::new();

        for (position, arg) in args.iter().enumerate() {
            let slot = match arg {
                FlatArg::Scalar(s) => {
                    cells.push(scalar_cell(*s));
                    Slot::Cell(cells.len() - 1)
                }
                FlatArg::Descriptor(d) => {
                    cells.push(BufferData::I32(d.as_array().to_vec()));
                    Slot::Cell(cells.len() - 1)
                }
                FlatArg::Bytes(b) => {
                    chars.push(b.clone());
                    Slot::Chars(chars.len() - 1)
                }
                FlatArg::Buffer(b) => match shared.iter().position(|s| s.ptr_eq(b)) {
                    Some(i) => Slot::Shared(i),
                    None => {
                        shared.push(b);
                        Slot::Shared(shared.len() - 1)
                    }
                },
                FlatArg::Opaque(value) => {
                    return Err(LowlevelError::call_shape(
                        routine,
                        format!("argument {position} is an unexpanded {}", value.kind()),
                    ))
                }
            };
            slots.push(slot);
        }

        let info = match status {
            StatusSlot::TrailingInfo => {
                cells.push(BufferData::I32(vec![0]));
                slots.push(Slot::Cell(cells.len() - 1));
                Some(cells.len() - 1)
            }
            StatusSlot::None => None,
        };

        // one write lock per distinct buffer, so aliased positions share it
        let guards = shared.into_iter().map(Buffer::write).collect();

        Ok(Self {
            slots,
            cells,
            chars,
            guards,
            info,
        })
    }

    pub(crate) fn pointers(&mut self) -> Vec<Ptr> {
        let mut ptrs = Vec::with_capacity(self.slots.len() + self.chars.len());
        for slot in &self.slots {
            ptrs.push(match *slot {
                Slot::Cell(i) => self.cells[i].as_mut_ptr(),
                Slot::Shared(i) => self.guards[i].as_mut_ptr(),
                Slot::Chars(i) => self.chars[i].as_mut_ptr().cast(),
            });
        }
        ptrs.extend(self.chars.iter().map(|c| c.len() as Ptr));
        ptrs
    }

    pub(crate) fn status(&self) -> FInt {
        match self.info.map(|i| &self.cells[i]) {
            Some(BufferData::I32(v)) => v.first().copied().unwrap_or(0),
            _ => 0,
        }
    }
}

fn scalar_cell(s: Scalar) -> BufferData {
    match s {
        Scalar::Int(v) => BufferData::I32(vec![v]),
        Scalar::Float32(v) => BufferData::F32(vec![v]),
        Scalar::Float64(v) => BufferData::F64(vec![v]),
        Scalar::Complex64(v) => BufferData::C64(vec![v]),
        Scalar::Complex128(v) => BufferData::C128(vec![v]),
    }
}

macro_rules! arity_dispatch {
    (@ptr $i:literal) => { Ptr };
    ($name:expr, $func:expr, $ptrs:expr; $($n:literal: ($($i:literal)*),)*) => {
        match $ptrs.len() {
            $(
                $n => {
                    let f = std::mem::transmute::<RawFn, unsafe extern "C" fn($(arity_dispatch!(@ptr $i)),*)>($func);
                    f($($ptrs[$i]),*);
                    Ok(())
                }
            )*
            n => Err(LowlevelError::call_shape(
                $name,
                format!("{n} native arguments exceed the limit of {MAX_ARITY}"),
            )),
        }
    };
}

/// Call `func` with `ptrs` as its argument list.
///
/// # Safety
///
/// `func` must be a Fortran subroutine taking exactly `ptrs.len()`
/// pointer-sized arguments, and every pointer must stay valid for the call.
unsafe fn dispatch(name: &str, func: RawFn, ptrs: &[Ptr]) -> Result<()> {
    arity_dispatch!(name, func, ptrs;
            0: (),
            1: (0),
            2: (0 1),
            3: (0 1 2),
            4: (0 1 2 3),
            5: (0 1 2 3 4),
            6: (0 1 2 3 4 5),
            7: (0 1 2 3 4 5 6),
            8: (0 1 2 3 4 5 6 7),
            9: (0 1 2 3 4 5 6 7 8),
            10: (0 1 2 3 4 5 6 7 8 9),
            11: (0 1 2 3 4 5 6 7 8 9 10),
            12: (0 1 2 3 4 5 6 7 8 9 10 11),
            13: (0 1 2 3 4 5 6 7 8 9 10 11 12),
            14: (0 1 2 3 4 5 6 7 8 9 10 11 12 13),
            15: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14),
            16: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15),
            17: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16),
            18: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17),
            19: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18),
            20: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19),
            21: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20),
            22: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21),
            23: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22),
            24: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23),
            25: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24),
            26: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25),
            27: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26),
            28: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27),
            29: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28),
            30: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29),
            31: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30),
            32: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31),
            33: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32),
            34: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33),
            35: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34),
            36: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35),
            37: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36),
            38: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37),
            39: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38),
            40: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39),
            41: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40),
            42: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41),
            43: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42),
            44: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43),
            45: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44),
            46: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45),
            47: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45 46),
            48: (0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47),
    )
}

/// Resolve every declaration in `decls` against `library`.
///
/// Returns the table of resolved routines and the names whose symbol was
/// not exported.
pub fn bind_library<'d>(
    library: &Arc<NativeLibrary>,
    style: SymbolStyle,
    decls: impl IntoIterator<Item = &'d RoutineDecl>,
) -> (RoutineTable, Vec<String>) {
    let mut table = RoutineTable::new();
    let mut missing = Vec::new();
    for decl in decls {
        match FortranRoutine::resolve(library, style, decl) {
            Ok(routine) => {
                table.insert(RegisteredRoutine::new(decl.name, decl.family, Arc::new(routine)));
            }
            Err(err) => {
                debug!("{}: {err}", decl.name);
                missing.push(decl.name.to_string());
            }
        }
    }
    if !missing.is_empty() {
        warn!(
            "{} of {} declared routines missing from {}",
            missing.len(),
            missing.len() + table.len(),
            library.path()
        );
    }
    (table, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use distla_abi::Descriptor;
    use distla_lowlevel::{Arg, WorkType};

    fn cell_i32(frame: &Frame<'_>, slot: usize) -> Vec<i32> {
        match &frame.slots[slot] {
            Slot::Cell(i) => match &frame.cells[*i] {
                BufferData::I32(v) => v.clone(),
                other => panic!("unexpected cell {other:?}"),
            },
            _ => panic!("slot {slot} is not an owned cell"),
        }
    }

    #[test]
    fn scalars_and_descriptors_become_owned_cells() {
        let desc = Descriptor::block_cyclic(3, 10, 10, 2, 2, 0, 0, 5);
        let args = vec![FlatArg::int(7), FlatArg::Descriptor(desc)];
        let frame = Frame::marshal("pdtest", &args, StatusSlot::None).unwrap();
        assert_eq!(cell_i32(&frame, 0), vec![7]);
        assert_eq!(cell_i32(&frame, 1), desc.as_array().to_vec());
        assert!(frame.info.is_none());
    }

    #[test]
    fn info_slot_is_appended_last() {
        let args = vec![FlatArg::int(1)];
        let mut frame = Frame::marshal("pdtest", &args, StatusSlot::TrailingInfo).unwrap();
        assert_eq!(frame.pointers().len(), 2);
        assert_eq!(cell_i32(&frame, 1), vec![0]);
        if let BufferData::I32(v) = &mut frame.cells[1] {
            v[0] = -3;
        }
        assert_eq!(frame.status(), -3);
    }

    #[test]
    fn character_lengths_follow_regular_arguments() {
        let args = vec![
            FlatArg::Bytes(b"V".to_vec()),
            FlatArg::int(4),
            FlatArg::Bytes(b"LO".to_vec()),
        ];
        let mut frame = Frame::marshal("pztest", &args, StatusSlot::TrailingInfo).unwrap();
        let ptrs = frame.pointers();
        assert_eq!(ptrs.len(), 6);
        assert_eq!(ptrs[4] as usize, 1);
        assert_eq!(ptrs[5] as usize, 2);
    }

    #[test]
    fn aliased_buffers_share_one_lock() {
        let a = Buffer::zeros(WorkType::Float64, 4);
        let b = Buffer::zeros(WorkType::Float64, 4);
        let args = vec![
            FlatArg::Buffer(a.clone()),
            FlatArg::Buffer(b),
            FlatArg::Buffer(a),
        ];
        let mut frame = Frame::marshal("pdtest", &args, StatusSlot::None).unwrap();
        assert_eq!(frame.guards.len(), 2);
        let ptrs = frame.pointers();
        assert_eq!(ptrs[0], ptrs[2]);
        assert_ne!(ptrs[0], ptrs[1]);
    }

    #[test]
    fn opaque_values_are_rejected() {
        let args = vec![FlatArg::int(1), FlatArg::Opaque(Box::new(Arg::from("V")))];
        let err = Frame::marshal("pztest", &args, StatusSlot::TrailingInfo)
            .err()
            .unwrap();
        match err {
            LowlevelError::CallShape { routine, reason } => {
                assert_eq!(routine, "pztest");
                assert!(reason.contains("argument 1"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    unsafe extern "C" fn pzfake(
        jobz: *mut c_void,
        n: *mut c_void,
        a: *mut c_void,
        info: *mut c_void,
        jobz_len: *mut c_void,
    ) {
        let a = std::slice::from_raw_parts_mut(a as *mut f64, 3);
        a[0] = 11.0;
        a[1] = *(jobz as *const u8) as f64;
        a[2] = jobz_len as usize as f64;
        *(info as *mut i32) = -*(n as *const i32);
    }

    #[test]
    fn resolved_call_returns_info_and_writes_caller_buffers() {
        let func = unsafe {
            std::mem::transmute::<unsafe extern "C" fn(Ptr, Ptr, Ptr, Ptr, Ptr), RawFn>(pzfake)
        };
        let routine = unsafe { FortranRoutine::from_raw("pzfake", func, StatusSlot::TrailingInfo) };
        assert_eq!(routine.symbol(), "pzfake");
        assert_eq!(routine.status_slot(), StatusSlot::TrailingInfo);

        let a = Buffer::from(vec![0.0f64; 3]);
        let args = vec![
            FlatArg::Bytes(b"V".to_vec()),
            FlatArg::int(43),
            FlatArg::Buffer(a.clone()),
        ];
        let status = routine.call(&args).unwrap();

        assert_eq!(status, -43);
        // 'V' as a byte, then its hidden length passed after INFO
        assert_eq!(a.snapshot(), BufferData::F64(vec![11.0, 86.0, 1.0]));
    }

    unsafe extern "C" fn pdfakedot(n: *mut c_void, dot: *mut c_void) {
        *(n as *mut i32) = 7;
        *(dot as *mut f64) = 7.0;
    }

    #[test]
    fn scalar_outputs_need_length_one_buffers() {
        let func = unsafe {
            std::mem::transmute::<unsafe extern "C" fn(Ptr, Ptr), RawFn>(pdfakedot)
        };
        let routine = unsafe { FortranRoutine::from_raw("pdfakedot", func, StatusSlot::None) };

        let dot = Buffer::from(vec![0.0f64]);
        let args = vec![FlatArg::int(0), FlatArg::Buffer(dot.clone())];
        assert_eq!(routine.call(&args).unwrap(), 0);

        // the scalar was copied into a cell; the buffer was written in place
        assert_eq!(args[0], FlatArg::int(0));
        assert_eq!(dot.snapshot(), BufferData::F64(vec![7.0]));
    }

    #[test]
    fn dispatch_rejects_oversized_lists() {
        unsafe extern "C" fn never() {}
        let ptrs = vec![std::ptr::null_mut(); MAX_ARITY + 1];
        let err = unsafe { dispatch("pdbig", never, &ptrs) }.unwrap_err();
        assert!(matches!(err, LowlevelError::CallShape { .. }));
    }

    #[test]
    fn dispatch_passes_pointers_in_order() {
        unsafe extern "C" fn add(a: *mut c_void, b: *mut c_void, out: *mut c_void) {
            let (a, b, out) = (a as *const i32, b as *const i32, out as *mut i32);
            *out = *a + *b;
        }
        let (mut a, mut b, mut out) = (2i32, 40i32, 0i32);
        let ptrs: Vec<Ptr> = vec![
            (&mut a as *mut i32).cast(),
            (&mut b as *mut i32).cast(),
            (&mut out as *mut i32).cast(),
        ];
        let func = unsafe { std::mem::transmute::<unsafe extern "C" fn(Ptr, Ptr, Ptr), RawFn>(add) };
        unsafe { dispatch("add", func, &ptrs) }.unwrap();
        assert_eq!(out, 42);
    }
}
