use mongodb::error::{ErrorKind, WriteFailure};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unique violation")]
    UniqueViolation,

    #[error("no document updated")]
    NoDocumentUpdated,

    #[error("mongo error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

impl Error {
    ///
    /// Maps duplicate key errors to [Error::UniqueViolation].
    ///
    /// Inserts report them as write errors,
    /// findAndModify commands report them as command errors.
    ///
    pub fn from_write(err: mongodb::error::Error) -> Self {
        let code = match *err.kind {
            ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => write_error.code,
            ErrorKind::Command(ref command_error) => command_error.code,
            _ => return Error::Mongo(err),
        };

        match code == DUPLICATE_KEY_CODE {
            true => Error::UniqueViolation,
            false => Error::Mongo(err),
        }
    }
}
