use crate::buffer::Buffer;
use crate::matrix::{DistributedMatrix, MatrixHandle};
use crate::workspace::WorkArray;
use distla_abi::{Descriptor, FInt};
use num_complex::{Complex32, Complex64};

/// Scalar passed by reference to a native routine.
///
/// The routine sees a private copy, so anything it writes back is lost.
/// Output scalars (`M` and `NZ` of `p?syevx`, `DOT` of `p?dot`, ...) must
/// be passed as length-1 [`Buffer`]s instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(FInt),
    Float32(f32),
    Float64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
}

/// One entry of a logical argument list.
///
/// `Matrix`, `Work` and `Text` are rewritten by the expander; `Seq` is
/// flattened in place; everything else reaches the native routine as is.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Scalar(Scalar),
    Buffer(Buffer),
    /// Pre-encoded character argument.
    Bytes(Vec<u8>),
    Text(String),
    Descriptor(Descriptor),
    Matrix(MatrixHandle),
    Work(WorkArray),
    /// Caller-built group of arguments, e.g. `(local, ia, ja, desc)` for a sub-block.
    Seq(Vec<Arg>),
}

impl Arg {
    pub fn matrix<M: DistributedMatrix + ?Sized>(m: &M) -> Self {
        Arg::Matrix(MatrixHandle::of(m))
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Arg::Bytes(b.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Scalar(_) => "scalar",
            Arg::Buffer(_) => "buffer",
            Arg::Bytes(_) => "bytes",
            Arg::Text(_) => "text",
            Arg::Descriptor(_) => "descriptor",
            Arg::Matrix(_) => "distributed matrix",
            Arg::Work(_) => "work array",
            Arg::Seq(_) => "sequence",
        }
    }

    /// True if this argument is, or contains, a `WorkArray`.
    pub fn contains_work(&self) -> bool {
        match self {
            Arg::Work(_) => true,
            Arg::Seq(items) => items.iter().any(Arg::contains_work),
            _ => false,
        }
    }
}

/// One entry of a flat argument list, the only form the native boundary accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatArg {
    /// Input only; see [`Scalar`] for output scalars.
    Scalar(Scalar),
    Buffer(Buffer),
    Bytes(Vec<u8>),
    Descriptor(Descriptor),
    /// A logical argument forwarded without expansion (raw mode only).
    Opaque(Box<Arg>),
}

impl FlatArg {
    pub fn int(v: FInt) -> Self {
        FlatArg::Scalar(Scalar::Int(v))
    }

    pub fn as_int(&self) -> Option<FInt> {
        match self {
            FlatArg::Scalar(Scalar::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&Buffer> {
        match self {
            FlatArg::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FlatArg::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_descriptor(&self) -> Option<&Descriptor> {
        match self {
            FlatArg::Descriptor(d) => Some(d),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FlatArg::Scalar(_) => "scalar",
            FlatArg::Buffer(_) => "buffer",
            FlatArg::Bytes(_) => "bytes",
            FlatArg::Descriptor(_) => "descriptor",
            FlatArg::Opaque(arg) => arg.kind(),
        }
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v)
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Scalar(Scalar::$variant(v))
                }
            }
        )*
    };
}

scalar_conversions!(
    FInt => Int,
    f32 => Float32,
    f64 => Float64,
    Complex32 => Complex64,
    Complex64 => Complex128,
);

impl From<Scalar> for Arg {
    fn from(s: Scalar) -> Self {
        Arg::Scalar(s)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Text(c.to_string())
    }
}

impl From<Buffer> for Arg {
    fn from(b: Buffer) -> Self {
        Arg::Buffer(b)
    }
}

impl From<&Buffer> for Arg {
    fn from(b: &Buffer) -> Self {
        Arg::Buffer(b.clone())
    }
}

impl From<Descriptor> for Arg {
    fn from(d: Descriptor) -> Self {
        Arg::Descriptor(d)
    }
}

impl From<MatrixHandle> for Arg {
    fn from(m: MatrixHandle) -> Self {
        Arg::Matrix(m)
    }
}

impl From<&MatrixHandle> for Arg {
    fn from(m: &MatrixHandle) -> Self {
        Arg::Matrix(m.clone())
    }
}

impl From<WorkArray> for Arg {
    fn from(w: WorkArray) -> Self {
        Arg::Work(w)
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(items: Vec<Arg>) -> Self {
        Arg::Seq(items)
    }
}

/// Build a logical argument list, converting each item with `Arg::from`.
///
/// ```
/// use distla_lowlevel::{args, Arg, WorkArray};
///
/// let list = args!['V', "L", 100, WorkArray::from_codes("ZDI").unwrap()];
/// assert_eq!(list.len(), 4);
/// assert!(matches!(list[3], Arg::Work(_)));
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::Arg::from($arg)),*]
    };
}
