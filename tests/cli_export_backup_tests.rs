use predicates::str::contains;
use std::fs;

mod common;
use common::{Sandbox, days_ago, iso, today};

fn seed_due_list(sb: &Sandbox) {
    sb.init();
    sb.add_room("201", days_ago(14), 14); // due today
    sb.lt()
        .args([
            "add",
            "202",
            "--last",
            &iso(days_ago(7)),
            "--interval",
            "7",
            "--note",
            "allergic, feather free",
        ])
        .assert()
        .success(); // due today
    sb.add_room("203", days_ago(7), 7);
    sb.lt().args(["pause", "203"]).assert().success(); // due today but paused
    sb.add_room("204", days_ago(20), 14); // overdue, not on today's list
}

#[test]
fn test_export_csv_contains_only_unpaused_rooms_due_today() {
    let sb = Sandbox::new();
    seed_due_list(&sb);
    let out = sb.path("today.csv");

    sb.lt()
        .args(["export", "--file", &out.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("CSV export completed (2 room(s))"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Room,Interval,LastChanged,NextDue,Note");
    assert_eq!(
        lines[1],
        format!("201,14,{},{},", iso(days_ago(14)), iso(today()))
    );
    assert_eq!(
        lines[2],
        format!(
            "202,7,{},{},allergic  feather free",
            iso(days_ago(7)),
            iso(today())
        )
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_default_name_in_database_dir() {
    let sb = Sandbox::new();
    seed_due_list(&sb);

    sb.lt()
        .args(["export", "--format", "json"])
        .assert()
        .success();

    let expected = sb.path(&format!("due_list_{}.json", iso(today())));
    let content = fs::read_to_string(&expected).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[0]["room"], "201");
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let sb = Sandbox::new();
    seed_due_list(&sb);
    let out = sb.path("list.csv");
    let out = out.to_string_lossy();

    sb.lt().args(["export", "--file", &out]).assert().success();

    sb.lt()
        .args(["export", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("use --force"));

    sb.lt()
        .args(["export", "--file", &out, "--force"])
        .assert()
        .success();
}

#[test]
fn test_export_with_nothing_due_writes_header_only() {
    let sb = Sandbox::new();
    sb.init();
    sb.add_room("301", today(), 14);
    let out = sb.path("empty.csv");

    sb.lt()
        .args(["export", "--file", &out.to_string_lossy()])
        .assert()
        .success()
        .stderr(contains("No rooms are due"));

    assert_eq!(
        fs::read_to_string(&out).expect("read csv"),
        "Room,Interval,LastChanged,NextDue,Note\n"
    );
}

#[test]
fn test_backup_rotation_directory() {
    let sb = Sandbox::new();
    sb.init();

    sb.lt()
        .arg("backup")
        .assert()
        .success()
        .stdout(contains("Backup written to"));

    let backups: Vec<_> = fs::read_dir(sb.path("backups"))
        .expect("backup dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("linentrack_test_"));
    assert!(backups[0].ends_with(".sqlite"));
}

#[test]
fn test_backup_to_file_and_compressed() {
    let sb = Sandbox::new();
    sb.init();

    let plain = sb.path("copy.sqlite");
    sb.lt()
        .args(["backup", "--file", &plain.to_string_lossy()])
        .assert()
        .success();
    assert!(plain.exists());

    let zipped = sb.path("copy_zip.sqlite");
    sb.lt()
        .args(["backup", "--file", &zipped.to_string_lossy(), "--compress"])
        .assert()
        .success()
        .stdout(contains("copy_zip.zip"));
    assert!(sb.path("copy_zip.zip").exists());
}

#[test]
fn test_backup_compress_requires_file() {
    let sb = Sandbox::new();
    sb.lt().args(["backup", "--compress"]).assert().failure();
}
