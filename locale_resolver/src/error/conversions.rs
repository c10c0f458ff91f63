//! Conversions between external error types and the crate's errors.

use figment::Error as FigmentError;

use super::ResolverError;

impl From<FigmentError> for ResolverError {
    fn from(e: FigmentError) -> Self {
        Self::Settings(Box::new(e))
    }
}

impl From<Box<FigmentError>> for ResolverError {
    fn from(e: Box<FigmentError>) -> Self {
        Self::Settings(e)
    }
}
