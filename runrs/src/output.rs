use indexmap::IndexMap;
use runrs_core::dashboard::page::DashboardPage;
use runrs_core::records::alert_type;
use serde_json::Value;

fn state_line(state: &Value) -> String {
    let status = state["status"].as_str().unwrap_or("unknown");
    let playbook = state
        .pointer("/playbook/name")
        .and_then(Value::as_str)
        .unwrap_or("?");
    let play = state
        .pointer("/play/name")
        .and_then(Value::as_str)
        .unwrap_or("?");
    let play_id = state
        .pointer("/play/id")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    format!(
        "[{}] {} :: {} (play {}) -> {}",
        alert_type(status),
        playbook,
        play,
        play_id,
        status
    )
}

pub fn print_dashboard(page: &DashboardPage) {
    if let Some(status) = &page.status {
        println!("status filter: {status}");
    }
    for (hostname, states) in &page.states {
        println!("{hostname}:");
        for state in states {
            println!("  {}", state_line(state));
        }
    }
}

pub fn print_hosts(latest: &IndexMap<String, Value>) {
    for (hostname, state) in latest {
        println!("{hostname}: {}", state_line(state));
    }
}
