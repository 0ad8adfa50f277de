use serde::{Deserialize, Serialize};

/// A machine targeted by playbook runs, with its per-run task counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ok: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub unreachable: u32,
    #[serde(default)]
    pub changed: u32,
    #[serde(default)]
    pub skipped: u32,
}

impl Host {
    pub fn new(id: u64, name: &str) -> Self {
        Host {
            id,
            name: name.to_string(),
            ok: 0,
            failed: 0,
            unreachable: 0,
            changed: 0,
            skipped: 0,
        }
    }
}
