use serde::{Deserialize, Serialize};
use std::fmt;

pub mod host;
pub mod play;
pub mod playbook;
pub mod result;

use host::Host;

/// Outcome of the most recent play for a host, derived from the host's
/// failure counters at aggregation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

impl Status {
    pub fn for_host(host: &Host) -> Self {
        if host.failed + host.unreachable > 0 {
            Status::Fail
        } else {
            Status::Success
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Fail => "fail",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw status string to the alert class used when rendering it.
pub fn alert_type(status: &str) -> &'static str {
    match status {
        "running" => "info",
        "success" => "success",
        "fail" => "danger",
        _ => "dark",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, Status::Success)]
    #[case(1, 0, Status::Fail)]
    #[case(0, 2, Status::Fail)]
    #[case(3, 1, Status::Fail)]
    fn status_follows_failure_counters(
        #[case] failed: u32,
        #[case] unreachable: u32,
        #[case] expected: Status,
    ) {
        let mut host = Host::new(1, "web01");
        host.failed = failed;
        host.unreachable = unreachable;
        assert_eq!(Status::for_host(&host), expected);
    }

    #[rstest]
    #[case("running", "info")]
    #[case("success", "success")]
    #[case("fail", "danger")]
    #[case("expired", "dark")]
    fn alert_types(#[case] status: &str, #[case] expected: &str) {
        assert_eq!(alert_type(status), expected);
    }
}
