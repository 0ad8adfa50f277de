use serde_json::{json, Value};

use crate::dashboard::aggregator::AggregatedState;
use crate::records::host::Host;
use crate::records::play::Play;
use crate::records::playbook::Playbook;

/// How much of a host record to include when serializing a state. The
/// dashboard uses the simple shape; the per-host views use the detailed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostVariant {
    Simple,
    Detailed,
}

pub fn serialize_host(host: &Host, variant: HostVariant) -> Value {
    match variant {
        HostVariant::Simple => json!({
            "id": host.id,
            "name": host.name,
        }),
        HostVariant::Detailed => json!({
            "id": host.id,
            "name": host.name,
            "ok": host.ok,
            "failed": host.failed,
            "unreachable": host.unreachable,
            "changed": host.changed,
            "skipped": host.skipped,
        }),
    }
}

pub fn serialize_play(play: &Play) -> Value {
    json!({
        "id": play.id,
        "name": play.name,
        "playbook": play.playbook,
    })
}

pub fn serialize_playbook(playbook: &Playbook) -> Value {
    json!({
        "id": playbook.id,
        "path": playbook.path,
        "name": playbook.display_name(),
    })
}

/// Full state payload as it is cached and returned to the caller.
pub fn serialize_state(state: &AggregatedState, variant: HostVariant) -> Value {
    json!({
        "host": serialize_host(&state.host, variant),
        "play": serialize_play(&state.play),
        "playbook": serialize_playbook(&state.playbook),
        "status": state.status.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Status;

    fn sample_state() -> AggregatedState {
        let mut host = Host::new(1, "web01");
        host.ok = 4;
        host.failed = 1;
        AggregatedState {
            host,
            play: Play::new(7, "deploy", 1),
            playbook: Playbook::new(1, "/opt/demo/site.yml"),
            status: Status::Fail,
        }
    }

    #[test]
    fn simple_host_omits_counters() {
        let value = serialize_host(&sample_state().host, HostVariant::Simple);
        assert_eq!(value["name"], "web01");
        assert!(value.get("failed").is_none());
    }

    #[test]
    fn detailed_host_includes_counters() {
        let value = serialize_host(&sample_state().host, HostVariant::Detailed);
        assert_eq!(value["ok"], 4);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["unreachable"], 0);
    }

    #[test]
    fn state_payload_shape() {
        let value = serialize_state(&sample_state(), HostVariant::Simple);
        assert_eq!(value["status"], "fail");
        assert_eq!(value["play"]["id"], 7);
        assert_eq!(value["playbook"]["name"], "opt/demo");
        assert_eq!(value["host"]["id"], 1);
    }
}
