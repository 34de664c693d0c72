use serde::Serialize;

///
/// Envelope of every successful response.
///
/// Fields of the body are flattened next to `success`.
///
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,

    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
