use indexmap::IndexMap;
use serde_json::Value;

use super::aggregator::{AggregatedState, StateKey};
use crate::cache::{build_cache_key, CacheSession};
use crate::serializers::{serialize_state, HostVariant};

/// Builds the hostname -> states mapping from the aggregated data. Each key
/// is looked up in the cache first; a hit is used verbatim, a miss is
/// serialized fresh and staged for write-behind. Hostnames come out sorted
/// ascending; the list under each hostname keeps key encounter order.
pub async fn build_states(
    data: &IndexMap<StateKey, AggregatedState>,
    session: &mut CacheSession,
    variant: HostVariant,
) -> IndexMap<String, Vec<Value>> {
    let cache_keys: Vec<String> = data
        .values()
        .map(|state| build_cache_key(state.host.id, state.play.id))
        .collect();
    let cached = session.batch_get(&cache_keys).await;

    let mut states: IndexMap<String, Vec<Value>> = IndexMap::new();
    for (i, ((hostname, _), state)) in data.iter().enumerate() {
        let entries = states.entry(hostname.clone()).or_default();

        if let Some(hit) = &cached[i] {
            entries.push(hit.clone());
            continue;
        }

        let fresh = serialize_state(state, variant);
        session.stage(&cache_keys[i], &fresh);
        entries.push(fresh);
    }

    states.sort_keys();
    states
}

/// Reduces rendered states to the single latest one per hostname, picking
/// the entry with the highest play id.
pub fn latest_per_host(states: &IndexMap<String, Vec<Value>>) -> IndexMap<String, Value> {
    let mut latest = IndexMap::new();
    for (hostname, entries) in states {
        let best = entries.iter().max_by_key(|state| {
            state
                .pointer("/play/id")
                .and_then(Value::as_u64)
                .unwrap_or(0)
        });
        if let Some(state) = best {
            latest.insert(hostname.clone(), state.clone());
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StateCache;
    use crate::dashboard::aggregator::aggregate;
    use crate::records::host::Host;
    use crate::records::play::Play;
    use crate::records::playbook::Playbook;
    use crate::records::result::ResultRecord;
    use serde_json::json;

    fn record(host_id: u64, hostname: &str, playbook_id: u64, play_id: u64) -> ResultRecord {
        ResultRecord {
            id: play_id,
            started: None,
            host: Host::new(host_id, hostname),
            play: Play::new(play_id, "play", playbook_id),
            playbook: Playbook::new(playbook_id, "/opt/demo/site.yml"),
        }
    }

    #[tokio::test]
    async fn hostnames_are_sorted_ascending() {
        let results = vec![
            record(3, "zulu", 1, 1),
            record(1, "alpha", 1, 2),
            record(2, "mike", 1, 3),
        ];
        let data = aggregate(&results);

        let cache = StateCache::disabled();
        let mut session = cache.session().await;
        let states = build_states(&data, &mut session, HostVariant::Simple).await;
        session.finish().await;

        let hostnames: Vec<&String> = states.keys().collect();
        assert_eq!(hostnames, vec!["alpha", "mike", "zulu"]);
    }

    #[tokio::test]
    async fn cached_payload_is_used_verbatim() {
        let results = vec![record(1, "alpha", 1, 7)];
        let data = aggregate(&results);

        let cache = StateCache::memory();
        let mut session = cache.session().await;
        // Plant a sentinel payload under the key the presenter will look up.
        session.stage(&build_cache_key(1, 7), &json!({"sentinel": true}));
        session.finish().await;

        let mut session = cache.session().await;
        let states = build_states(&data, &mut session, HostVariant::Simple).await;
        session.finish().await;

        assert_eq!(states["alpha"], vec![json!({"sentinel": true})]);
    }

    #[tokio::test]
    async fn latest_per_host_picks_highest_play_id() {
        let results = vec![
            record(1, "alpha", 1, 4),
            record(1, "alpha", 2, 9),
            record(2, "mike", 1, 2),
        ];
        let data = aggregate(&results);

        let cache = StateCache::disabled();
        let mut session = cache.session().await;
        let states = build_states(&data, &mut session, HostVariant::Simple).await;
        session.finish().await;

        let latest = latest_per_host(&states);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest["alpha"].pointer("/play/id"), Some(&json!(9)));
        assert_eq!(latest["mike"].pointer("/play/id"), Some(&json!(2)));
    }
}
