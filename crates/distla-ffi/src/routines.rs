//! Declarations of the routines a ScaLAPACK build exports.
//!
//! Only the calling shape matters here: argument lists are supplied by the
//! caller, so a declaration records the name, the family, and whether the
//! routine ends with an `INFO` output. A few ScaLAPACK auxiliaries
//! (`P?LAUUM`) have none.

use distla_lowlevel::RoutineFamily;

/// Whether the routine reports a status through a trailing `INFO` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSlot {
    /// Last argument is `INFO`; the adapter supplies it and returns its value.
    TrailingInfo,
    /// Plain subroutine; the call always reports status 0.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutineDecl {
    pub name: &'static str,
    pub family: RoutineFamily,
    pub status: StatusSlot,
}

impl RoutineDecl {
    pub const fn new(name: &'static str, family: RoutineFamily, status: StatusSlot) -> Self {
        Self {
            name,
            family,
            status,
        }
    }
}

pub static PBLAS: &[RoutineDecl] = &[
    RoutineDecl::new("pcaxpy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pccopy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcdotc", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcdotu", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcgemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcgemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcger", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pchemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pchemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcher", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcher2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcher2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcherk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcscal", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcswap", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcsymm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcsyr2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pcsyrk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctran", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctranc", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctranu", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctrmm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctrmv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctrsm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pctrsv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdamax", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdasum", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdaxpy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdcopy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pddot", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdgemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdgemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdger", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdnrm2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdscal", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdswap", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsymm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsymv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsyr", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsyr2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsyr2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdsyrk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdtran", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdtrmm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdtrmv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdtrsm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pdtrsv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psamax", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psasum", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psaxpy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pscopy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psdot", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psgemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psgemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psger", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psnrm2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psscal", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("psswap", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssymm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssymv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssyr", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssyr2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssyr2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pssyrk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pstran", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pstrmm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pstrmv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pstrsm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pstrsv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzaxpy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzcopy", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzdotc", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzdotu", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzgemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzgemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzger", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzhemm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzhemv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzher", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzher2", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzher2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzherk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzscal", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzswap", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzsymm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzsyr2k", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pzsyrk", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztran", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztranc", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztranu", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztrmm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztrmv", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztrsm", RoutineFamily::Pblas, StatusSlot::None),
    RoutineDecl::new("pztrsv", RoutineFamily::Pblas, StatusSlot::None),
];

pub static SCALAPACK: &[RoutineDecl] = &[
    RoutineDecl::new("pcdbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcdtsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgebrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgecon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgehrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgelqf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgels", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgeqrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgerfs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgesv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgesvd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgetrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgetri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcgetrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcheev", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcheevd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcheevx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pchegvx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pchetrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pclauum", RoutineFamily::Scalapack, StatusSlot::None),
    RoutineDecl::new("pcpbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcpocon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcposv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcpotrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcpotri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcpotrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcptsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pctrtri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pctrtrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcungqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcunmlq", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pcunmqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pddbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pddtsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgebrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgecon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgehrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgelqf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgels", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgeqrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgerfs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgesv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgesvd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgetrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgetri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdgetrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdlauum", RoutineFamily::Scalapack, StatusSlot::None),
    RoutineDecl::new("pdorgqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdormlq", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdormqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdpbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdpocon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdposv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdpotrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdpotri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdpotrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdptsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdstebz", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdstein", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdsyev", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdsyevd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdsyevx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdsygvx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdsytrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdtrtri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pdtrtrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psdbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psdtsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgebrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgecon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgehrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgelqf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgels", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgeqrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgerfs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgesv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgesvd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgetrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgetri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psgetrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pslauum", RoutineFamily::Scalapack, StatusSlot::None),
    RoutineDecl::new("psorgqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psormlq", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psormqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pspbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pspocon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psposv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pspotrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pspotri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pspotrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psptsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psstebz", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("psstein", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pssyev", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pssyevd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pssyevx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pssygvx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pssytrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pstrtri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pstrtrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzdbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzdtsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgebrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgecon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgehrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgelqf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgels", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgeqrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgerfs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgesv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgesvd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgetrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgetri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzgetrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzheev", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzheevd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzheevx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzhegvx", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzhetrd", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzlauum", RoutineFamily::Scalapack, StatusSlot::None),
    RoutineDecl::new("pzpbsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzpocon", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzposv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzpotrf", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzpotri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzpotrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzptsv", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pztrtri", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pztrtrs", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzungqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzunmlq", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
    RoutineDecl::new("pzunmqr", RoutineFamily::Scalapack, StatusSlot::TrailingInfo),
];

pub static REDIST: &[RoutineDecl] = &[
    RoutineDecl::new("pcgemr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pctrmr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pdgemr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pdtrmr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pigemr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pitrmr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("psgemr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pstrmr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pzgemr2d", RoutineFamily::Redist, StatusSlot::None),
    RoutineDecl::new("pztrmr2d", RoutineFamily::Redist, StatusSlot::None),
];

/// Every declared routine, PBLAS first.
pub fn all_routines() -> impl Iterator<Item = &'static RoutineDecl> {
    PBLAS.iter().chain(SCALAPACK).chain(REDIST)
}

pub fn family_routines(family: RoutineFamily) -> &'static [RoutineDecl] {
    match family {
        RoutineFamily::Pblas => PBLAS,
        RoutineFamily::Scalapack => SCALAPACK,
        RoutineFamily::Redist => REDIST,
    }
}

pub fn find_routine(name: &str) -> Option<&'static RoutineDecl> {
    all_routines().find(|decl| decl.name.eq_ignore_ascii_case(name))
}
