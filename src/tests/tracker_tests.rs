use super::*;
use crate::month::FixedClock;
use crate::roster::ClientTasks;
use std::cell::Cell;
use tempfile::TempDir;

fn roster() -> Roster {
    Roster::new(vec![
        Client {
            id: ClientId(1),
            name: "Posts only".to_string(),
            category: String::new(),
            tasks: ClientTasks {
                videos: "N/A".to_string(),
                posts: "10".to_string(),
                visiting: "N/A".to_string(),
                stories: "N/A".to_string(),
                sponsorship: "200$".to_string(),
            },
        },
        Client {
            id: ClientId(2),
            name: "Range".to_string(),
            category: String::new(),
            tasks: ClientTasks {
                videos: "2-3".to_string(),
                posts: "N/A".to_string(),
                visiting: "N/A".to_string(),
                stories: "N/A".to_string(),
                sponsorship: "N/A".to_string(),
            },
        },
    ])
}

fn clock(year: i32, month: u32) -> FixedClock {
    FixedClock::ymd(year, month, 15).unwrap()
}

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn open(dir: &TempDir, clock: FixedClock, policy: WritePolicy) -> Tracker<FixedClock> {
    let repo = ProgressRepository::new(dir.path().join("task_progress.json"));
    Tracker::open(repo, roster(), clock, policy)
}

/// A clock that can be moved forward between calls.
struct SteppingClock(Cell<chrono::NaiveDate>);

impl Clock for SteppingClock {
    fn today(&self) -> chrono::NaiveDate {
        self.0.get()
    }
}

#[test]
fn test_set_persists_current_month() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());

    assert_eq!(tracker.set(ClientId(1), TaskField::Posts, 4).unwrap(), 4);

    let reloaded = ProgressRepository::new(dir.path().join("task_progress.json")).load();
    assert_eq!(reloaded.entry(&month("2024-03"), ClientId(1)).completed_posts, 4);
    assert_eq!(tracker.entry(&month("2024-03"), ClientId(1)).completed_posts, 4);
}

#[test]
fn test_set_clamps_counts_on_write_by_default() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());

    assert_eq!(tracker.set(ClientId(1), TaskField::Posts, 12).unwrap(), 10);
    assert_eq!(tracker.set(ClientId(1), TaskField::Sponsorship, 250).unwrap(), 250);
}

#[test]
fn test_set_without_clamping_keeps_raw_value_but_aggregate_clamps() {
    let dir = TempDir::new().unwrap();
    let policy = WritePolicy {
        clamp_on_write: false,
    };
    let mut tracker = open(&dir, clock(2024, 3), policy);

    assert_eq!(tracker.set(ClientId(1), TaskField::Posts, 12).unwrap(), 12);
    tracker.set(ClientId(1), TaskField::Sponsorship, 250).unwrap();

    let current = tracker.current_month();
    assert_eq!(tracker.entry(&current, ClientId(1)).completed_posts, 12);

    let summary = tracker.summary(&current);
    let posts = summary.client(ClientId(1)).unwrap().tasks.posts;
    assert_eq!(posts.completed, 10);
    assert_eq!(posts.percentage(), 100.0);

    let spend = summary.client(ClientId(1)).unwrap().tasks.sponsorship;
    assert_eq!(spend.completed, 250);
    assert_eq!(summary.fleet.sponsorship.total, 200);
    assert_eq!(summary.fleet.sponsorship.completed, 250);
}

#[test]
fn test_unknown_client_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());

    let err = tracker.set(ClientId(42), TaskField::Posts, 1).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TrackerError>(),
        Some(&TrackerError::UnknownClient(ClientId(42)))
    );
    assert!(!dir.path().join("task_progress.json").exists());
}

#[test]
fn test_adjust_stays_within_quota() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());

    assert_eq!(tracker.adjust(ClientId(2), TaskField::Videos, 1).unwrap(), 1);
    assert_eq!(tracker.adjust(ClientId(2), TaskField::Videos, 5).unwrap(), 3);
    assert_eq!(tracker.adjust(ClientId(2), TaskField::Videos, -1).unwrap(), 2);
    assert_eq!(tracker.adjust(ClientId(2), TaskField::Videos, -10).unwrap(), 0);
}

#[test]
fn test_adjust_starts_from_clamped_value() {
    let dir = TempDir::new().unwrap();
    let policy = WritePolicy {
        clamp_on_write: false,
    };
    let mut tracker = open(&dir, clock(2024, 3), policy);
    tracker.set(ClientId(1), TaskField::Posts, 15).unwrap();

    assert_eq!(tracker.adjust(ClientId(1), TaskField::Posts, -1).unwrap(), 9);
}

#[test]
fn test_adjust_sponsorship_has_no_upper_bound() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());

    assert_eq!(tracker.adjust(ClientId(1), TaskField::Sponsorship, 500).unwrap(), 500);
    assert_eq!(tracker.adjust(ClientId(1), TaskField::Sponsorship, -800).unwrap(), 0);
}

#[test]
fn test_adjust_on_zero_quota_stays_zero() {
    let dir = TempDir::new().unwrap();
    let mut tracker = open(&dir, clock(2024, 3), WritePolicy::default());
    assert_eq!(tracker.adjust(ClientId(2), TaskField::Posts, 3).unwrap(), 0);
}

#[test]
fn test_months_and_editability() {
    let dir = TempDir::new().unwrap();
    let repo = ProgressRepository::new(dir.path().join("task_progress.json"));
    let store = ProgressStore::new().set_count(&month("2024-01"), ClientId(1), TaskField::Posts, 3);
    repo.persist(&store).unwrap();

    let tracker = Tracker::open(repo, roster(), clock(2024, 2), WritePolicy::default());

    assert_eq!(tracker.current_month(), month("2024-02"));
    assert_eq!(tracker.months(), vec![month("2024-02"), month("2024-01")]);
    assert!(tracker.is_editable(&month("2024-02")));
    assert!(!tracker.is_editable(&month("2024-01")));
    assert_eq!(
        tracker.entry(&month("2024-02"), ClientId(1)),
        ProgressEntry::default()
    );
}

#[test]
fn test_writes_follow_month_rollover() {
    let dir = TempDir::new().unwrap();
    let repo = ProgressRepository::new(dir.path().join("task_progress.json"));
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let mut tracker = Tracker::open(
        repo,
        roster(),
        SteppingClock(Cell::new(start)),
        WritePolicy::default(),
    );

    tracker.set(ClientId(1), TaskField::Posts, 7).unwrap();
    tracker
        .clock
        .0
        .set(chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    tracker.set(ClientId(1), TaskField::Posts, 2).unwrap();

    assert_eq!(tracker.entry(&month("2024-01"), ClientId(1)).completed_posts, 7);
    assert_eq!(tracker.entry(&month("2024-02"), ClientId(1)).completed_posts, 2);
}

#[test]
fn test_failed_persist_keeps_previous_state() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes the rename fail.
    let path = dir.path().join("task_progress.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("occupied"), "x").unwrap();

    let mut tracker = Tracker::open(
        ProgressRepository::new(&path),
        roster(),
        clock(2024, 3),
        WritePolicy::default(),
    );

    assert!(tracker.set(ClientId(1), TaskField::Posts, 3).is_err());
    assert!(tracker.store().is_empty());
}

#[test]
fn test_offset_saturates() {
    assert_eq!(offset(3, -5), 0);
    assert_eq!(offset(u64::MAX, 1), u64::MAX);
    assert_eq!(offset(3, 2), 5);
}

#[test]
fn test_write_after_corrupt_load_keeps_old_history_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("task_progress.json");
    let original = r#"{"2023-12": {"1": {"completedPosts": 9}}, "2024-1": {}}"#;
    std::fs::write(&path, original).unwrap();

    let mut tracker = open(&dir, clock(2024, 2), WritePolicy::default());
    tracker.set(ClientId(1), TaskField::Posts, 3).unwrap();

    let mut files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0], "task_progress.json");
    assert!(files[1].starts_with("task_progress.json.corrupt-"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(&files[1])).unwrap(),
        original
    );
}
