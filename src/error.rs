use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers the error conditions that can occur while loading unit dumps, building the
/// entity model, and rendering the model document. Unresolvable call targets and phantom types
/// are deliberately *not* errors (see the crate documentation); they are ordinary, queryable
/// states of the model.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be interpreted.
    ///
    /// This error indicates that a unit dump (or other input structure) does not conform to the
    /// expected shape. The error includes the source location where the malformation was
    /// detected for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A method body could not be retrieved from the loader.
    ///
    /// Non-fatal at the analysis level: the scan logs the method identity and cause, records no
    /// exception-flow or call-site data for the method, and continues with the next one.
    #[error("Method body unavailable for {method} - {reason}")]
    BodyUnavailable {
        /// Identity of the affected method (`Type.name signature`)
        method: String,
        /// Why the body could not be retrieved
        reason: String,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from serde_json while decoding a unit dump.
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from quick-xml while writing the model document.
    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
