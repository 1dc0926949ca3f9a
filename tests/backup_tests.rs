use chrono::NaiveDateTime;
use linentrack::core::backup::{BackupLogic, BackupPlan};
use std::fs;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn plan_in(dir: &std::path::Path, retention: usize) -> BackupPlan {
    let db_path = dir.join("rooms.sqlite");
    fs::write(&db_path, b"not really sqlite").unwrap();
    BackupPlan {
        db_path,
        backup_dir: dir.join("backups"),
        retention,
    }
}

#[test]
fn rotation_keeps_the_newest_copies() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_in(tmp.path(), 3);

    for stamp in [
        "2024-01-01 08:00:00",
        "2024-01-02 08:00:00",
        "2024-01-03 08:00:00",
        "2024-01-04 08:00:00",
        "2024-01-05 08:00:00",
    ] {
        assert!(BackupLogic::try_run(&plan, at(stamp)).unwrap().is_some());
    }

    let kept: Vec<String> = BackupLogic::list_backups(&plan)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        kept,
        vec![
            "rooms_2024-01-05_08-00-00.sqlite",
            "rooms_2024-01-04_08-00-00.sqlite",
            "rooms_2024-01-03_08-00-00.sqlite",
        ]
    );
}

#[test]
fn rotation_with_fewer_files_than_retention_removes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_in(tmp.path(), 30);

    BackupLogic::try_run(&plan, at("2024-01-01 08:00:00")).unwrap();
    BackupLogic::try_run(&plan, at("2024-01-02 08:00:00")).unwrap();

    assert_eq!(BackupLogic::rotate(&plan).unwrap(), 0);
    assert_eq!(BackupLogic::list_backups(&plan).unwrap().len(), 2);
}

#[test]
fn foreign_files_survive_rotation() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_in(tmp.path(), 1);
    fs::create_dir_all(&plan.backup_dir).unwrap();
    fs::write(plan.backup_dir.join("README.txt"), b"keep me").unwrap();

    BackupLogic::try_run(&plan, at("2024-01-01 08:00:00")).unwrap();
    BackupLogic::try_run(&plan, at("2024-01-02 08:00:00")).unwrap();

    assert!(plan.backup_dir.join("README.txt").exists());
    assert_eq!(BackupLogic::list_backups(&plan).unwrap().len(), 1);
}

#[test]
fn daily_backup_runs_once_per_day() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_in(tmp.path(), 30);

    assert!(BackupLogic::run_daily(&plan, at("2024-02-01 07:00:00")).is_some());
    assert!(BackupLogic::run_daily(&plan, at("2024-02-01 18:00:00")).is_none());
    assert!(BackupLogic::run_daily(&plan, at("2024-02-02 07:00:00")).is_some());
    assert_eq!(BackupLogic::list_backups(&plan).unwrap().len(), 2);
}

#[test]
fn same_second_backup_never_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_in(tmp.path(), 30);
    let now = at("2024-02-01 07:00:00");

    BackupLogic::try_run(&plan, now).unwrap();
    assert!(BackupLogic::try_run(&plan, now).is_err());
    assert!(BackupLogic::run(&plan, now).is_none());
}

#[test]
fn missing_database_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = BackupPlan {
        db_path: tmp.path().join("absent.sqlite"),
        backup_dir: tmp.path().join("backups"),
        retention: 5,
    };
    assert!(BackupLogic::try_run(&plan, at("2024-02-01 07:00:00")).unwrap().is_none());
    assert!(!plan.backup_dir.exists());
}
