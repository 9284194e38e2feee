#![cfg(all(unix, feature = "cli"))]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/swcli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn wait_for_socket(path: &Path, timeout: Duration) {
    let start = Instant::now();
    while !path.exists() {
        if start.elapsed() >= timeout {
            panic!("socket {} never appeared", path.display());
        }
        thread::sleep(Duration::from_millis(25));
    }
}

fn write_csv(path: &Path, points: &[(f64, f64)]) {
    let mut body = String::from("x,y\n");
    for (x, y) in points {
        writeln!(body, "{x},{y}").expect("string write");
    }
    std::fs::write(path, body).expect("csv should be writable");
}

fn scanwire() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scanwire"));
    cmd.arg("--log-level").arg("error");
    cmd
}

fn spawn_server(args: &[&str], sock_path: &Path) -> Child {
    let child = scanwire()
        .args(args)
        .arg(sock_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("server should start");
    wait_for_socket(sock_path, Duration::from_secs(3));
    child
}

fn json_lines(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout should be json lines"))
        .collect()
}

fn tread_points() -> Vec<(f64, f64)> {
    (0..40)
        .map(|i| {
            let x = i as f64;
            (x, 0.01 * x * x)
        })
        .collect()
}

#[test]
fn listen_prints_sent_profiles_in_order() {
    let dir = unique_temp_dir("listen");
    let sock_path = dir.join("listen.sock");
    write_csv(&dir.join("flange.csv"), &[(1.0, 2.0), (3.5, -4.25)]);
    write_csv(&dir.join("tread.csv"), &tread_points());

    let child = spawn_server(&["--format", "json", "listen", "--count", "2"], &sock_path);

    let status = scanwire()
        .arg("send")
        .arg(&sock_path)
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("flange.csv").display()))
        .arg("--profile")
        .arg(format!("Tread={}", dir.join("tread.csv").display()))
        .status()
        .expect("send should run");
    assert!(status.success());

    let output = child.wait_with_output().expect("listen should exit");
    assert!(output.status.success());
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["label"], "Flange");
    assert_eq!(lines[0]["points"][1][1], -4.25);
    assert_eq!(lines[1]["label"], "Tread");
    assert_eq!(lines[1]["point_count"], 40);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn raw_strategy_drops_labels() {
    let dir = unique_temp_dir("raw");
    let sock_path = dir.join("raw.sock");
    write_csv(&dir.join("scan.csv"), &[(0.5, 0.25)]);

    let child = spawn_server(
        &["--format", "json", "--strategy", "raw", "--byte-order", "big", "listen", "--count", "1"],
        &sock_path,
    );

    let status = scanwire()
        .args(["--strategy", "raw", "--byte-order", "big", "send"])
        .arg(&sock_path)
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("scan.csv").display()))
        .status()
        .expect("send should run");
    assert!(status.success());

    let output = child.wait_with_output().expect("listen should exit");
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["label"], "");
    assert_eq!(lines[0]["points"][0][0], 0.5);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn repeated_strategy_keeps_labels() {
    let dir = unique_temp_dir("repeated");
    let sock_path = dir.join("repeated.sock");
    write_csv(&dir.join("scan.csv"), &[(0.5, 0.25), (-1.0, 2.0)]);

    let child = spawn_server(
        &["--format", "json", "--strategy", "repeated", "listen", "--count", "1"],
        &sock_path,
    );

    let status = scanwire()
        .args(["--strategy", "repeated", "send"])
        .arg(&sock_path)
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("scan.csv").display()))
        .status()
        .expect("send should run");
    assert!(status.success());

    let output = child.wait_with_output().expect("listen should exit");
    let lines = json_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["label"], "Flange");
    assert_eq!(lines[0]["point_count"], 2);
    assert_eq!(lines[0]["points"][1][1], 2.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn align_once_returns_flange_moved_onto_tread() {
    let dir = unique_temp_dir("align");
    let sock_path = dir.join("align.sock");
    let tread = tread_points();
    let (sin, cos) = 0.005f64.sin_cos();
    let flange: Vec<_> = tread
        .iter()
        .map(|&(x, y)| (cos * x - sin * y + 0.1, sin * x + cos * y - 0.05))
        .collect();
    write_csv(&dir.join("flange.csv"), &flange);
    write_csv(&dir.join("tread.csv"), &tread);

    let mut child = spawn_server(&["--format", "json", "align", "--once"], &sock_path);

    let output = scanwire()
        .args(["--format", "json", "send"])
        .arg(&sock_path)
        .arg("--profile")
        .arg(format!("Tread={}", dir.join("tread.csv").display()))
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("flange.csv").display()))
        .arg("--wait")
        .arg("2")
        .output()
        .expect("send should run");
    assert!(output.status.success());

    let lines = json_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["label"], "Flange");
    assert_eq!(lines[1]["label"], "Tread");

    let aligned = lines[0]["points"].as_array().expect("points array");
    assert_eq!(aligned.len(), tread.len());
    for (point, (x, y)) in aligned.iter().zip(&tread) {
        let ax = point[0].as_f64().expect("x");
        let ay = point[1].as_f64().expect("y");
        assert!((ax - x).abs() < 1e-6 && (ay - y).abs() < 1e-6);
    }

    let status = child.wait().expect("align should exit after one pair");
    assert!(status.success());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn send_to_missing_socket_is_transport_error() {
    let dir = unique_temp_dir("missing");
    write_csv(&dir.join("scan.csv"), &[(1.0, 1.0)]);

    let output = scanwire()
        .arg("send")
        .arg(dir.join("nobody.sock"))
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("scan.csv").display()))
        .output()
        .expect("send should run");

    assert_eq!(output.status.code(), Some(3));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn send_with_missing_csv_is_usage_error() {
    let dir = unique_temp_dir("nocsv");

    let output = scanwire()
        .arg("send")
        .arg(dir.join("scan.sock"))
        .arg("--profile")
        .arg(format!("Flange={}", dir.join("absent.csv").display()))
        .output()
        .expect("send should run");

    assert_eq!(output.status.code(), Some(64));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_reports_package_version() {
    let output = scanwire()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("scanwire {}", env!("CARGO_PKG_VERSION"))
    );
}
