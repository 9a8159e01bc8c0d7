//! Non-fatal decode diagnostics.
//!
//! Decoders never fail on these conditions. They hand a [`Warning`] to the
//! [`Diagnostics`] sink passed into the decode call and carry on.

use std::fmt;

use log::Level;

/// A recoverable oddity found while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// DDS declares a linear size but the field is zero; the computed size is used.
    LinearSizeMissing { computed: u64 },
    /// DDS declared linear size differs from the computed one; the declared value is kept.
    LinearSizeMismatch { expected: u64, declared: u64 },
    /// DDS mipmap count differs from the full chain length.
    MipCountMismatch { expected: u32, declared: u32 },
    /// Radiance header ended without a `#?RADIANCE` or `#?RGBE` line.
    UnverifiedRadianceSignature,
    /// Radiance resolution line uses a non-standard orientation, which is not applied.
    OrientationIgnored { orientation: String },
    /// Radiance `key=value` line with an unknown key.
    UnknownHeaderCommand { line: String },
    /// Radiance header line that is neither a comment nor a command.
    IgnoredHeaderLine { line: String },
}

impl Warning {
    /// Severity used when forwarding to the `log` facade.
    pub fn level(&self) -> Level {
        match self {
            Warning::IgnoredHeaderLine { .. } => Level::Debug,
            _ => Level::Warn,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LinearSizeMissing { computed } => {
                write!(f, "linear size flagged but zero, using computed size {computed}")
            }
            Warning::LinearSizeMismatch { expected, declared } => {
                write!(f, "expected linear size {expected}, header declares {declared}")
            }
            Warning::MipCountMismatch { expected, declared } => {
                write!(f, "got {declared} mipmaps, expected {expected}")
            }
            Warning::UnverifiedRadianceSignature => {
                f.write_str("missing #?RADIANCE signature, unsure if this is a Radiance file")
            }
            Warning::OrientationIgnored { orientation } => {
                write!(f, "flipping/rotating attributes ignored: {orientation}")
            }
            Warning::UnknownHeaderCommand { line } => write!(f, "header command ignored: {line}"),
            Warning::IgnoredHeaderLine { line } => write!(f, "ignored header line: {line}"),
        }
    }
}

/// Receiver for non-fatal decode warnings.
pub trait Diagnostics {
    /// Record a warning.
    fn report(&mut self, warning: Warning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, warning: Warning) {
        log::log!(warning.level(), "{}", warning);
    }
}

/// Collects warnings for later inspection.
impl Diagnostics for Vec<Warning> {
    fn report(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Discards warnings.
impl Diagnostics for () {
    fn report(&mut self, _warning: Warning) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, warning: Warning) {
        (**self).report(warning);
    }
}
