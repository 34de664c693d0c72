use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TicketPriority {
    High,
    #[default]
    Medium,
    Low,
}
