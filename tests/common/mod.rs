#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SCENARIO_CSV: &str = "\
Owner_Name,Khasra_No,Land_Type,Remarks_Kaifiyat,VDV_Verified_Name
Pawan Kumar,1001,Agricultural,Clean,Pawan Kumar
State Govt PWD,500,Gair Mumkin Sarak,Road Infra,State Govt PWD
Late Ghulam Rasool,405,Agri,Varasat Pending,
Ram Kumar,905,Agricultural,Clean,Totally Different Person
Refugee Alloc,601,Agri,Custodian Land,Refugee Alloc
";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            work,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("agrigov");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.work.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn write_home_policy(&self, contents: &str) -> PathBuf {
        let path = self.home.join(".config/agrigov/policy.toml");
        fs::create_dir_all(path.parent().expect("policy parent")).expect("create policy dir");
        fs::write(&path, contents).expect("write policy file");
        path
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn audit_json(&self, input: &PathBuf) -> Value {
        self.run_json(&["audit", input.to_str().expect("utf8 path")])
    }
}
