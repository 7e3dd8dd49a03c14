use super::*;
use crate::aggregate::aggregate;
use crate::progress::{MonthEntries, ProgressEntry};
use crate::roster::{Client, ClientId, ClientTasks};

fn month() -> MonthKey {
    "2024-03".parse().unwrap()
}

fn sample() -> Aggregate {
    let clients = vec![
        Client {
            id: ClientId(3),
            name: "Tabeekh".to_string(),
            category: String::new(),
            tasks: ClientTasks {
                videos: "2-3".to_string(),
                posts: "15".to_string(),
                visiting: "N/A".to_string(),
                stories: "N/A".to_string(),
                sponsorship: "200$".to_string(),
            },
        },
        Client {
            id: ClientId(2),
            name: "Idle".to_string(),
            category: String::new(),
            tasks: ClientTasks {
                videos: "N/A".to_string(),
                posts: "N/A".to_string(),
                visiting: "N/A".to_string(),
                stories: "N/A".to_string(),
                sponsorship: "N/A".to_string(),
            },
        },
    ];
    let mut entries = MonthEntries::new();
    entries.insert(
        ClientId(3),
        ProgressEntry {
            completed_videos: 1,
            completed_posts: 20,
            completed_sponsorship: 150,
            ..Default::default()
        },
    );
    aggregate(&clients, &entries)
}

#[test]
fn test_share_message_layout() {
    let message = share_message(&month(), &sample(), DEFAULT_HEADING);

    assert_eq!(
        message,
        "*Tasks report for March 2024*\n\n\
         *Tabeekh*:\n\
         - Videos: 1/3\n\
         - Posts: 15/15\n\
         - Sponsorship: $150 / $200\n\
         \n"
    );
}

#[test]
fn test_share_message_skips_clients_without_tasks() {
    let message = share_message(&month(), &sample(), DEFAULT_HEADING);
    assert!(!message.contains("Idle"));
}

#[test]
fn test_share_message_custom_heading() {
    let message = share_message(&month(), &Aggregate::default(), "Monthly report");
    assert_eq!(message, "*Monthly report March 2024*\n\n");
}

#[test]
fn test_overview_contains_clients_and_fleet() {
    let text = overview(&month(), &sample(), true);

    assert!(text.starts_with("March 2024 (2024-03, editable)"));
    assert!(text.contains("[3] Tabeekh"));
    assert!(text.contains("All clients"));
    assert!(text.contains("15 / 15"));
    assert!(text.contains("$150 / $200"));
    assert!(!text.contains("Idle"));
}

#[test]
fn test_overview_read_only_and_empty() {
    let text = overview(&month(), &Aggregate::default(), false);
    assert!(text.contains("read-only"));
    assert!(text.contains("No client has tasks assigned."));
}

#[test]
fn test_bar_bounds() {
    assert_eq!(bar(0.0), format!("[{}]", "-".repeat(20)));
    assert_eq!(bar(100.0), format!("[{}]", "#".repeat(20)));
    assert_eq!(bar(250.0), format!("[{}]", "#".repeat(20)));
    assert_eq!(bar(50.0), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
}
