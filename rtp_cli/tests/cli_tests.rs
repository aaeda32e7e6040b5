use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rtp_cli"))
        .args(args)
        .env_remove("RTP_TARGET")
        .output()
        .expect("cli should run")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("rtp-{name}-{stamp}.csv"))
}

#[test]
fn params_reports_derived_probability() {
    let output = run(&["params", "--rtp", "0.96"]);
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let p = payload["win_probability"].as_f64().unwrap();
    assert!((p - 0.0096).abs() < 1e-12);
    assert_eq!(payload["probability_clamped"], false);
    assert_eq!(payload["max_balance"], 1000.0);
}

#[test]
fn params_flags_clamped_probability() {
    let output = run(&["params", "--rtp", "0.5", "--low", "1", "--high", "10000"]);
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["probability_clamped"], true);
    assert_eq!(payload["win_probability"], 0.0);
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning"));
}

#[test]
fn simulate_is_reproducible_for_a_seed() {
    let args = ["simulate", "--rtp", "0.96", "--draws", "20000", "--seed", "fixed"];
    let a: serde_json::Value = serde_json::from_slice(&run(&args).stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&run(&args).stdout).unwrap();
    assert_eq!(a["total_payout"], b["total_payout"]);
    assert_eq!(a["seed_hash"], b["seed_hash"]);
    assert_eq!(a["mode"], "stateful");
    assert_eq!(a["draws"], 20000);
    let realized = a["realized_rtp"].as_f64().unwrap();
    assert!((realized - 0.96).abs() < 0.1, "{realized}");
}

#[test]
fn export_csv_writes_one_row_per_draw() {
    let path = unique_temp_path("trace");
    let output = run(&[
        "export-csv",
        path.to_str().unwrap(),
        "--rtp",
        "0.9",
        "--draws",
        "25",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("index,probability,multiplier,balance"));
    assert_eq!(lines.count(), 25);
    let _ = fs::remove_file(path);
}

#[test]
fn invalid_rtp_exits_non_zero() {
    for rtp in ["0", "1.5"] {
        let output = run(&["simulate", "--rtp", rtp, "--draws", "10"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("target RTP"));
    }
}
