use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub mod filter;

use crate::records::host::Host;
use crate::records::play::Play;
use crate::records::playbook::Playbook;
use crate::records::result::{ResultRecord, ResultRow};
use filter::DashboardFilter;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read run archive: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse run archive: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("bad data: {0}")]
    BadData(String),
}

/// On-disk shape of a run archive: flat record lists linked by id.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunArchive {
    pub hosts: Vec<Host>,
    pub playbooks: Vec<Playbook>,
    pub plays: Vec<Play>,
    pub results: Vec<ResultRow>,
}

/// In-memory result store. Holds the raw record rows and joins them on
/// demand; the external database this stands in for is out of scope.
#[derive(Debug, Default)]
pub struct RunStore {
    hosts: IndexMap<u64, Host>,
    playbooks: IndexMap<u64, Playbook>,
    plays: IndexMap<u64, Play>,
    results: Vec<ResultRow>,
}

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        let archive: RunArchive = serde_yaml::from_reader(file)?;
        Ok(Self::from_archive(archive))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, StoreError> {
        let archive: RunArchive = serde_yaml::from_str(content)?;
        Ok(Self::from_archive(archive))
    }

    pub fn from_archive(archive: RunArchive) -> Self {
        let mut store = Self::new();
        for host in archive.hosts {
            store.insert_host(host);
        }
        for playbook in archive.playbooks {
            store.insert_playbook(playbook);
        }
        for play in archive.plays {
            store.insert_play(play);
        }
        for result in archive.results {
            store.insert_result(result);
        }
        debug!(
            "loaded run archive: {} hosts, {} playbooks, {} plays, {} results",
            store.hosts.len(),
            store.playbooks.len(),
            store.plays.len(),
            store.results.len()
        );
        store
    }

    pub fn insert_host(&mut self, host: Host) {
        self.hosts.insert(host.id, host);
    }

    pub fn insert_playbook(&mut self, playbook: Playbook) {
        self.playbooks.insert(playbook.id, playbook);
    }

    pub fn insert_play(&mut self, play: Play) {
        self.plays.insert(play.id, play);
    }

    pub fn insert_result(&mut self, result: ResultRow) {
        self.results.push(result);
    }

    /// Joins every result row to its host, play and playbook, applies the
    /// filter, and returns the records ordered by host id, then playbook id,
    /// then play id descending. A dangling reference is fatal: the
    /// aggregation has no policy for partial records.
    pub fn dashboard_results(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<ResultRecord>, StoreError> {
        let mut records = Vec::with_capacity(self.results.len());

        for row in &self.results {
            let host = self.hosts.get(&row.host).ok_or_else(|| {
                StoreError::BadData(format!(
                    "result {} references unknown host {}",
                    row.id, row.host
                ))
            })?;
            let play = self.plays.get(&row.play).ok_or_else(|| {
                StoreError::BadData(format!(
                    "result {} references unknown play {}",
                    row.id, row.play
                ))
            })?;
            let playbook = self.playbooks.get(&play.playbook).ok_or_else(|| {
                StoreError::BadData(format!(
                    "play {} references unknown playbook {}",
                    play.id, play.playbook
                ))
            })?;

            if !filter.matches(host, playbook) {
                continue;
            }

            records.push(ResultRecord {
                id: row.id,
                started: row.started.clone(),
                host: host.clone(),
                play: play.clone(),
                playbook: playbook.clone(),
            });
        }

        records.sort_by(|a, b| {
            a.host
                .id
                .cmp(&b.host.id)
                .then(a.playbook.id.cmp(&b.playbook.id))
                .then(b.play.id.cmp(&a.play.id))
        });

        Ok(records)
    }
}
