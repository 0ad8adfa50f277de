use serde::{Deserialize, Serialize};

/// A named unit of work within a playbook. Play ids are monotonically
/// increasing in creation order, which makes the highest id the most
/// recently created play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Play {
    pub id: u64,
    pub name: String,
    pub playbook: u64,
    #[serde(default)]
    pub started: Option<String>,
}

impl Play {
    pub fn new(id: u64, name: &str, playbook: u64) -> Self {
        Play {
            id,
            name: name.to_string(),
            playbook,
            started: None,
        }
    }
}
