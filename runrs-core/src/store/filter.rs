use std::str::FromStr;

use super::StoreError;
use crate::records::host::Host;
use crate::records::playbook::Playbook;
use crate::records::Status;

/// Status filter accepted from the request, matched against the host's
/// derived status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    Success,
    Fail,
}

impl FromStr for StatusFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(StatusFilter::Success),
            "fail" => Ok(StatusFilter::Fail),
            other => Err(StoreError::BadData(format!(
                "unknown status filter '{other}'"
            ))),
        }
    }
}

/// Restricts the result stream before aggregation. `q` is a case-insensitive
/// substring match on host name or playbook path.
#[derive(Clone, Debug, Default)]
pub struct DashboardFilter {
    pub q: Option<String>,
    pub status: Option<StatusFilter>,
}

impl DashboardFilter {
    pub fn matches(&self, host: &Host, playbook: &Playbook) -> bool {
        if let Some(q) = &self.q {
            let q = q.to_lowercase();
            let host_match = host.name.to_lowercase().contains(&q);
            let playbook_match = playbook.path.to_lowercase().contains(&q);
            if !host_match && !playbook_match {
                return false;
            }
        }

        if let Some(status) = self.status {
            let derived = Status::for_host(host);
            let wanted = match status {
                StatusFilter::Success => Status::Success,
                StatusFilter::Fail => Status::Fail,
            };
            if derived != wanted {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn failing_host() -> Host {
        let mut host = Host::new(1, "db01");
        host.failed = 2;
        host
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some("db"), None, true)]
    #[case(Some("DB01"), None, true)]
    #[case(Some("web"), None, false)]
    #[case(Some("site.yml"), None, true)]
    #[case(None, Some(StatusFilter::Fail), true)]
    #[case(None, Some(StatusFilter::Success), false)]
    #[case(Some("db"), Some(StatusFilter::Fail), true)]
    #[case(Some("db"), Some(StatusFilter::Success), false)]
    fn filter_matching(
        #[case] q: Option<&str>,
        #[case] status: Option<StatusFilter>,
        #[case] expected: bool,
    ) {
        let filter = DashboardFilter {
            q: q.map(str::to_string),
            status,
        };
        let playbook = Playbook::new(1, "/opt/demo/site.yml");
        assert_eq!(filter.matches(&failing_host(), &playbook), expected);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "bogus".parse::<StatusFilter>().unwrap_err();
        assert!(err.to_string().contains("unknown status filter"));
    }
}
