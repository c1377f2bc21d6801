use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use objwalk_testkit::{fixture_path as shared_fixture_path, target_dir as workspace_target_dir};

static OBJWALK_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	shared_fixture_path(name)
}

pub(crate) fn run_objwalk(args: &[&str]) -> Output {
	Command::new(objwalk_bin()).args(args).output().expect("objwalk command executes")
}

pub(crate) fn run_objwalk_json(args: &[&str]) -> serde_json::Value {
	let output = run_objwalk(args);
	assert!(
		output.status.success(),
		"objwalk command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn objwalk_bin() -> &'static PathBuf {
	OBJWALK_BIN.get_or_init(resolve_objwalk_bin)
}

fn resolve_objwalk_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_objwalk") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = workspace_target_dir().join("debug");
	bin.push(if cfg!(windows) { "objwalk.exe" } else { "objwalk" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "objwalk"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build objwalk binary at {}", bin.display());

	bin
}
