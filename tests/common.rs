#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Days, Local, NaiveDate};
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch home directory holding the config dir and the test database.
pub struct Sandbox {
    pub home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp home"),
        }
    }

    pub fn db_path(&self) -> String {
        self.home
            .path()
            .join("linentrack_test.sqlite")
            .to_string_lossy()
            .to_string()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    /// `linentrack --db <sandbox db> --test` with HOME pointing into the sandbox.
    pub fn lt(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("linentrack");
        cmd.env("HOME", self.home.path())
            .env("APPDATA", self.home.path())
            .args(["--db", &self.db_path(), "--test"]);
        cmd
    }

    pub fn init(&self) {
        self.lt().arg("init").assert().success();
    }

    pub fn add_room(&self, room: &str, last: NaiveDate, interval: u32) {
        self.lt()
            .args([
                "add",
                room,
                "--last",
                &iso(last),
                "--interval",
                &interval.to_string(),
            ])
            .assert()
            .success();
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).expect("valid date")
}

pub fn days_ahead(n: u64) -> NaiveDate {
    today().checked_add_days(Days::new(n)).expect("valid date")
}

pub fn iso(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
