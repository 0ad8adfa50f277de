use serde::{Deserialize, Serialize};
use std::path::Path;

/// The top-level automation definition whose execution produces plays and
/// results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Playbook {
    pub id: u64,
    pub path: String,
}

impl Playbook {
    pub fn new(id: u64, path: &str) -> Self {
        Playbook {
            id,
            path: path.to_string(),
        }
    }

    /// Short display name: the last two components of the playbook's
    /// directory, joined with `/`. A path directly under the root keeps its
    /// leading slash (`/srv/site.yml` -> `/srv`).
    pub fn display_name(&self) -> String {
        let dir = Path::new(&self.path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let components: Vec<&str> = dir.split('/').collect();
        let start = components.len().saturating_sub(2);
        components[start..].join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/var/lib/ansible/site.yml", "lib/ansible")]
    #[case("/srv/site.yml", "/srv")]
    #[case("site.yml", "")]
    #[case("deploy/web/rollout.yml", "deploy/web")]
    fn display_names(#[case] path: &str, #[case] expected: &str) {
        let playbook = Playbook::new(1, path);
        assert_eq!(playbook.display_name(), expected);
    }
}
