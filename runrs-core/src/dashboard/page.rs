use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Page model handed to the (external) rendering layer.
#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub page: &'static str,
    pub states: IndexMap<String, Vec<Value>>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_page_marker_and_filter_echo() {
        let mut states = IndexMap::new();
        states.insert("web01".to_string(), vec![json!({"status": "success"})]);

        let page = DashboardPage {
            page: "dashboard",
            states,
            status: Some("success".to_string()),
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], "dashboard");
        assert_eq!(value["status"], "success");
        assert_eq!(value["states"]["web01"][0]["status"], "success");
    }
}
