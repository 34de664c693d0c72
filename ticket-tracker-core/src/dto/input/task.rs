use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    pub text: Option<String>,
    pub completed: Option<bool>,
}
