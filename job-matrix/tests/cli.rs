//! End-to-end tests that run the `job-matrix` binary.

use std::{
	path::Path,
	process::{Command, Output},
};

use serde_json::Value;

fn run(args: &[&str], github_output: Option<&Path>) -> Output {
	let mut cmd = Command::new(env!("CARGO_BIN_EXE_job-matrix"));
	cmd.args(args).env_remove("GITHUB_OUTPUT");
	if let Some(path) = github_output {
		cmd.env("GITHUB_OUTPUT", path);
	}
	cmd.output().expect("failed to run job-matrix")
}

fn jobs(output: &Output) -> Vec<Value> {
	assert!(
		output.status.success(),
		"job-matrix failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
	let obj = doc.as_object().unwrap();
	assert_eq!(obj.len(), 1);
	obj["include"].as_array().unwrap().clone()
}

const FIELDS: [&str; 9] = [
	"cmake-version",
	"compiler-name",
	"compiler-version",
	"conan-version",
	"os-name",
	"os-version",
	"platform",
	"python-version",
	"runner",
];

fn assert_all_fields(jobs: &[Value]) {
	for job in jobs {
		let keys: Vec<&str> = job.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, FIELDS, "{job}");
	}
}

#[test]
fn alpine_only() {
	let jobs = jobs(&run(&["--include-alpine"], None));
	assert_eq!(jobs.len(), 2);
	assert_all_fields(&jobs);

	for job in &jobs {
		assert_eq!(job["os-name"], "alpine");
		assert_eq!(job["os-version"], "3.22");
		assert!(job["compiler-name"].is_null());
		assert!(job["compiler-version"].is_null());
		assert!(job["python-version"].is_null());
		assert_eq!(job["cmake-version"], "4.0.*");
		assert_eq!(job["conan-version"], "2.18.*");
	}

	assert_eq!(jobs[0]["platform"], "linux/amd64");
	assert_eq!(jobs[0]["runner"], "ubuntu-24.04");
	assert_eq!(jobs[1]["platform"], "linux/arm64");
	assert_eq!(jobs[1]["runner"], "ubuntu-24.04-arm");
}

#[test]
fn ubuntu_only() {
	let jobs = jobs(&run(&["--include-ubuntu"], None));
	assert_eq!(jobs.len(), 46);
	assert_all_fields(&jobs);
	assert!(jobs.iter().all(|j| j["os-name"] == "ubuntu"));

	let (amd, arm) = jobs.split_at(23);
	assert!(amd.iter().all(|j| j["platform"] == "linux/amd64"));
	assert!(arm.iter().all(|j| j["platform"] == "linux/arm64"));

	let gcc11: Vec<&Value> = amd
		.iter()
		.filter(|j| j["compiler-name"] == "gcc" && j["compiler-version"] == 11)
		.collect();
	assert_eq!(gcc11.len(), 1);
	assert_eq!(gcc11[0]["os-version"], "24.04");
	assert_eq!(gcc11[0]["python-version"], "3.12");

	let clang20: Vec<&str> = amd
		.iter()
		.filter(|j| j["compiler-name"] == "clang" && j["compiler-version"] == 20)
		.map(|j| j["os-version"].as_str().unwrap())
		.collect();
	assert_eq!(clang20, ["20.04", "22.04", "24.04"]);
}

#[test]
fn ubuntu_table_order() {
	let jobs = jobs(&run(&["--include-ubuntu"], None));
	let rows: Vec<String> = jobs[..23]
		.iter()
		.map(|j| {
			format!(
				"{}-{} {} {}",
				j["compiler-name"].as_str().unwrap(),
				j["compiler-version"],
				j["os-version"].as_str().unwrap(),
				j["python-version"].as_str().unwrap()
			)
		})
		.collect();

	assert_eq!(rows, [
		"gcc-8 20.04 3.9",
		"gcc-9 22.04 3.11",
		"gcc-10 24.04 3.12",
		"gcc-11 24.04 3.12",
		"gcc-12 24.04 3.12",
		"gcc-13 24.04 3.12",
		"gcc-14 24.04 3.12",
		"gcc-15 25.04 3.13",
		"clang-8 20.04 3.9",
		"clang-9 20.04 3.9",
		"clang-10 20.04 3.9",
		"clang-11 22.04 3.11",
		"clang-12 22.04 3.11",
		"clang-13 22.04 3.11",
		"clang-14 24.04 3.12",
		"clang-15 24.04 3.12",
		"clang-16 24.04 3.12",
		"clang-17 24.04 3.12",
		"clang-18 24.04 3.12",
		"clang-19 24.04 3.12",
		"clang-20 20.04 3.9",
		"clang-20 22.04 3.11",
		"clang-20 24.04 3.12",
	]);
}

#[test]
fn both_distributions_alpine_first() {
	let jobs = jobs(&run(&["--include-ubuntu", "--include-alpine"], None));
	assert_eq!(jobs.len(), 48);
	assert_all_fields(&jobs);

	let (amd, arm) = jobs.split_at(24);
	for bucket in [amd, arm] {
		assert_eq!(bucket[0]["os-name"], "alpine");
		assert!(bucket[1..].iter().all(|j| j["os-name"] == "ubuntu"));
	}
}

#[test]
fn custom_versions_and_runners() {
	let jobs = jobs(&run(
		&[
			"--include-alpine",
			"--include-ubuntu",
			"--cmake-version",
			"3.31.*",
			"--conan-version",
			"2.17.*",
			"--runner-x86",
			"self-hosted-x64",
			"--runner-arm",
			"self-hosted-arm",
		],
		None,
	));

	for job in &jobs {
		assert_eq!(job["cmake-version"], "3.31.*");
		assert_eq!(job["conan-version"], "2.17.*");
		let runner = if job["platform"] == "linux/amd64" {
			"self-hosted-x64"
		} else {
			"self-hosted-arm"
		};
		assert_eq!(job["runner"], runner);
	}
}

#[test]
fn no_distribution_is_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("github_output");

	let output = run(&[], Some(path.as_path()));
	assert!(!output.status.success());
	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty());
	assert!(String::from_utf8_lossy(&output.stderr).contains("no jobs were generated"));
	assert!(!path.exists());
}

#[test]
fn unknown_flag_is_usage_error() {
	let output = run(&["--include-alpine", "--include-debian"], None);
	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn stdout_is_byte_stable() {
	let args = ["--include-alpine", "--include-ubuntu"];
	let a = run(&args, None);
	let b = run(&args, None);
	assert!(a.status.success());
	assert_eq!(a.stdout, b.stdout);
	assert!(a.stdout.starts_with(b"{\n  \"include\": [\n    {\n      \"cmake-version\""));
}

#[test]
fn github_output_lines() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("github_output");

	let output = run(&["--include-alpine", "--include-ubuntu"], Some(path.as_path()));
	let stdout_jobs = jobs(&output);

	let contents = std::fs::read_to_string(&path).unwrap();
	let lines: Vec<(&str, &str)> = contents
		.lines()
		.map(|l| l.split_once('=').unwrap())
		.collect();
	assert_eq!(
		lines.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
		["matrix-amd64", "matrix-arm64", "matrix"]
	);

	let include = |json: &str| -> Vec<Value> {
		assert!(!json.contains(' '), "not compact: {json}");
		let v: Value = serde_json::from_str(json).unwrap();
		v["include"].as_array().unwrap().clone()
	};
	let amd = include(lines[0].1);
	let arm = include(lines[1].1);
	let all = include(lines[2].1);

	assert_eq!(amd.len() + arm.len(), all.len());
	assert_eq!([amd, arm].concat(), all);
	assert_eq!(all, stdout_jobs);
}
