use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentCreate {
    pub text: String,
}
