use dayplan_core::storage::FileStorage;
use dayplan_core::{
    GestureKind, HOUR_HEIGHT, KeyValueStorage, LAST_HOUR, NewTask, PlannerConfig, TaskPatch,
    TaskStatus, TaskStore, TimelineGesture,
};
use tempfile::tempdir;
use tracing_subscriber::EnvFilter;

const DAY: &str = "2024-03-01";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn file_store_survives_restart_after_gesture_commits() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let config = PlannerConfig::default();

    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut store = TaskStore::from_config(storage, &config);
    store.hydrate();

    let standup = store.add_task(NewTask {
        start_hour: Some(9),
        ..NewTask::new(DAY, "Standup")
    });
    let inbox = store.add_task(NewTask::new(DAY, "Inbox zero"));

    let layout = *store.layout();
    let mut gesture = TimelineGesture::default();

    let task = store.get(&standup).cloned().expect("standup exists");
    assert!(gesture.press(GestureKind::Move, &task, 200.0, &layout));
    gesture.track(200.0 + 20.0 * HOUR_HEIGHT, &layout);
    let (id, patch) = gesture.release().expect("move commit").into_patch();
    assert!(store.update_task(&id, patch));

    let task = store.get(&inbox).cloned().expect("inbox exists");
    assert!(gesture.press(GestureKind::Move, &task, 0.0, &layout));
    gesture.track(4.0 * HOUR_HEIGHT, &layout);
    let (id, patch) = gesture.release().expect("schedule commit").into_patch();
    store.update_task(&id, patch);

    let task = store.get(&inbox).cloned().expect("inbox exists");
    assert!(gesture.press(GestureKind::Resize, &task, 0.0, &layout));
    gesture.track(2.0 * HOUR_HEIGHT, &layout);
    let (id, patch) = gesture.release().expect("resize commit").into_patch();
    store.update_task(&id, patch);
    store.update_task(&inbox, TaskPatch::with_status(TaskStatus::InProgress));

    let storage = FileStorage::open(temp.path()).expect("reopen storage");
    let mut reopened = TaskStore::from_config(storage, &config);
    reopened.hydrate();
    assert_eq!(reopened.tasks(), store.tasks());

    let day = reopened.tasks_for_date(DAY);
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].title, "Inbox zero");
    assert_eq!(day[0].start_hour, Some(10));
    assert_eq!(day[0].duration, 3);
    assert_eq!(day[0].status, TaskStatus::InProgress);
    assert_eq!(day[1].title, "Standup");
    assert_eq!(day[1].start_hour, Some(LAST_HOUR));
}

#[test]
fn corrupt_file_hydrates_empty_and_is_overwritten_on_next_write() {
    init_tracing();
    let temp = tempdir().expect("tempdir");
    let config = PlannerConfig::default();

    let storage = FileStorage::open(temp.path()).expect("open storage");
    std::fs::write(storage.path_for(&config.storage.key), "{{{ definitely not json")
        .expect("write corrupt blob");

    let mut store = TaskStore::from_config(storage.clone(), &config);
    store.hydrate();
    assert!(store.tasks().is_empty());

    store.add_task(NewTask::new(DAY, "fresh start"));
    let raw = storage
        .read(&config.storage.key)
        .expect("read back")
        .expect("blob present");
    assert!(raw.starts_with('['));
    assert!(raw.contains("fresh start"));
}
