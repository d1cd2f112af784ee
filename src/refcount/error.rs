use core::fmt;

/// Why the reference-count entry points could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The runtime module is not loaded in this process.
    NotResident {
        /// Module path or name that was looked up.
        module: String,
    },
    /// The module is loaded but does not export the symbol.
    MissingSymbol {
        /// Symbol name that was looked up.
        symbol: String,
    },
    /// A configured module or symbol name contains an interior NUL.
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// This platform has no way to look up symbols of a resident module.
    Unsupported,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotResident { module } => {
                write!(f, "runtime module `{module}` is not loaded in this process")
            }
            Self::MissingSymbol { symbol } => {
                write!(f, "symbol `{symbol}` is not exported by the runtime module")
            }
            Self::InvalidName { name } => {
                write!(f, "`{}` contains an interior NUL byte", name.escape_debug())
            }
            Self::Unsupported => {
                f.write_str("resident-module symbol lookup is not supported on this platform")
            }
        }
    }
}

impl std::error::Error for ResolveError {}
