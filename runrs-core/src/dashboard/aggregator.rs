use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::records::host::Host;
use crate::records::play::Play;
use crate::records::playbook::Playbook;
use crate::records::result::ResultRecord;
use crate::records::Status;

/// Aggregation key: one entry per (host name, playbook id) pair.
pub type StateKey = (String, u64);

/// The latest known state for a (host, playbook) pair: the play with the
/// highest id among that pair's results, with the status derived from the
/// host's failure counters.
#[derive(Clone, Debug)]
pub struct AggregatedState {
    pub host: Host,
    pub play: Play,
    pub playbook: Playbook,
    pub status: Status,
}

impl AggregatedState {
    fn from_result(record: &ResultRecord) -> Self {
        AggregatedState {
            status: Status::for_host(&record.host),
            host: record.host.clone(),
            play: record.play.clone(),
            playbook: record.playbook.clone(),
        }
    }
}

/// Reduces a result stream to one state per key. The store hands results
/// over with the highest play id first per group, so the comparison below
/// normally fires only on first encounter; it is still performed explicitly
/// so correctness never depends on the caller's ordering.
pub fn aggregate(results: &[ResultRecord]) -> IndexMap<StateKey, AggregatedState> {
    let mut data: IndexMap<StateKey, AggregatedState> = IndexMap::new();

    for record in results {
        let key = (record.host.name.clone(), record.playbook.id);
        match data.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(AggregatedState::from_result(record));
            }
            Entry::Occupied(mut entry) => {
                if record.play.id > entry.get().play.id {
                    entry.insert(AggregatedState::from_result(record));
                }
            }
        }
    }

    data
}
