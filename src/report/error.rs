use std::fmt;
use std::io;
use std::path::PathBuf;

/// An error raised while ingesting, rendering or publishing a report.
#[derive(Debug)]
pub enum Error {
    /// The input matched neither the multi-suite nor the single-suite schema.
    /// Carries the single-suite decode failure; the multi-suite failure is
    /// suppressed since bare suites are the common fallback shape.
    Parse(quick_xml::de::DeError),
    /// The template could not be compiled or bound to the report model.
    Render(liquid::Error),
    /// The output path could not be written or replaced.
    Publish { path: PathBuf, source: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "failed to parse report document: {}", err),
            Error::Render(err) => write!(f, "failed to render report: {}", err),
            Error::Publish { path, source } => {
                write!(f, "failed to publish report to '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Publish { source, .. } => Some(source),
        }
    }
}

impl From<quick_xml::de::DeError> for Error {
    fn from(err: quick_xml::de::DeError) -> Self {
        Error::Parse(err)
    }
}

impl From<liquid::Error> for Error {
    fn from(err: liquid::Error) -> Self {
        Error::Render(err)
    }
}
