use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Waiting,
    Closed,
}
