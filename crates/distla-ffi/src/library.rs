//! Shared library loading and symbol lookup.

use distla_lowlevel::{LowlevelError, Result};
use libloading::Library;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Address of an exported routine, before it is given a real signature.
pub type RawFn = unsafe extern "C" fn();

/// A loaded native library.
pub struct NativeLibrary {
    library: Library,
    path: String,
}

impl NativeLibrary {
    /// Load a native library from a path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path) }.map_err(|e| {
            LowlevelError::Library(format!("failed to load '{}': {e}", path.display()))
        })?;
        debug!("loaded native library {}", path.display());
        Ok(Self {
            library,
            path: path.display().to_string(),
        })
    }

    /// Load a library by base name (`"scalapack"`), letting the system
    /// loader search its usual paths.
    pub fn load_by_name(name: &str) -> Result<Self> {
        let file_name = Self::platform_lib_name(name);
        let library = unsafe { Library::new(&file_name) }.map_err(|e| {
            LowlevelError::Library(format!("failed to load '{name}' (tried '{file_name}'): {e}"))
        })?;
        debug!("loaded native library {file_name}");
        Ok(Self {
            library,
            path: file_name,
        })
    }

    pub fn platform_lib_name(name: &str) -> String {
        #[cfg(target_os = "windows")]
        {
            format!("{name}.dll")
        }
        #[cfg(target_os = "macos")]
        {
            format!("lib{name}.dylib")
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            format!("lib{name}.so")
        }
    }

    /// Look up an exported symbol by its exact name.
    ///
    /// # Safety
    ///
    /// The returned address is untyped; callers must only invoke it through
    /// the routine's real signature, and not after this library is dropped.
    pub unsafe fn raw_symbol(&self, symbol: &str) -> Result<RawFn> {
        let mut name = symbol.as_bytes().to_vec();
        name.push(0);
        self.library
            .get::<RawFn>(&name)
            .map(|sym| *sym)
            .map_err(|e| {
                LowlevelError::Library(format!("symbol '{symbol}' not found in '{}': {e}", self.path))
            })
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        unsafe { self.raw_symbol(symbol) }.is_ok()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("path", &self.path).finish()
    }
}

/// How a compiler decorates Fortran subroutine names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolStyle {
    /// `pzheevd_` (gfortran, ifort on Unix)
    #[default]
    LowerUnderscore,
    /// `pzheevd`
    Lower,
    /// `PZHEEVD`
    Upper,
}

impl SymbolStyle {
    pub fn symbol_name(self, routine: &str) -> String {
        match self {
            SymbolStyle::LowerUnderscore => format!("{}_", routine.to_ascii_lowercase()),
            SymbolStyle::Lower => routine.to_ascii_lowercase(),
            SymbolStyle::Upper => routine.to_ascii_uppercase(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lower_underscore" | "underscore" | "gfortran" => Some(SymbolStyle::LowerUnderscore),
            "lower" => Some(SymbolStyle::Lower),
            "upper" => Some(SymbolStyle::Upper),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolStyle::LowerUnderscore => "lower_underscore",
            SymbolStyle::Lower => "lower",
            SymbolStyle::Upper => "upper",
        }
    }
}

impl std::fmt::Display for SymbolStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_lib_name() {
        let name = NativeLibrary::platform_lib_name("scalapack");
        #[cfg(target_os = "windows")]
        assert_eq!(name, "scalapack.dll");
        #[cfg(target_os = "macos")]
        assert_eq!(name, "libscalapack.dylib");
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libscalapack.so");
    }

    #[test]
    fn symbol_names_follow_style() {
        assert_eq!(SymbolStyle::LowerUnderscore.symbol_name("pzheevd"), "pzheevd_");
        assert_eq!(SymbolStyle::Lower.symbol_name("PZHEEVD"), "pzheevd");
        assert_eq!(SymbolStyle::Upper.symbol_name("pzheevd"), "PZHEEVD");
    }

    #[test]
    fn styles_parse_and_serialize() {
        assert_eq!(SymbolStyle::parse("Lower-Underscore"), Some(SymbolStyle::LowerUnderscore));
        assert_eq!(SymbolStyle::parse("upper"), Some(SymbolStyle::Upper));
        assert_eq!(SymbolStyle::parse("mixed"), None);
        let json = serde_json::to_string(&SymbolStyle::LowerUnderscore).unwrap();
        assert_eq!(json, "\"lower_underscore\"");
    }

    #[test]
    fn missing_library_reports_library_error() {
        let err = NativeLibrary::load("/nonexistent/libdistla-missing.so").unwrap_err();
        assert!(matches!(err, LowlevelError::Library(msg) if msg.contains("libdistla-missing")));
    }
}
