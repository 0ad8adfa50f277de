use serde::{Deserialize, Serialize};

use super::host::Host;
use super::play::Play;
use super::playbook::Playbook;

/// A stored result row as it appears in a run archive: references its host
/// and play by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: u64,
    pub host: u64,
    pub play: u64,
    #[serde(default)]
    pub started: Option<String>,
}

/// A result with its host, play and playbook eagerly attached, as handed to
/// the aggregator by the store.
#[derive(Clone, Debug)]
pub struct ResultRecord {
    pub id: u64,
    pub started: Option<String>,
    pub host: Host,
    pub play: Play,
    pub playbook: Playbook,
}
