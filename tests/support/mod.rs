//! Shared fixtures for the integration tests.
//!
//! `FakeGhdl` writes a small shell script that answers `-a`, `-e` and `-r`
//! the way GHDL does on disk: one object per analyzed file, a library cache,
//! an elaboration marker and an executable named after the unit. It records
//! every invocation and copies each analyzed source aside, so tests can check
//! what the simulator actually saw.

#![allow(dead_code)]

use ghdl_bench::sim::Simulator;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
LOG='@LOG@'
printf '%s\t%s\n' "$(pwd -P)" "$*" >> "$LOG/invocations"
mode="$1"
shift
@PRELUDE@
case "$mode" in
  -a)
    for arg in "$@"; do
      case "$arg" in
        -*) ;;
        *)
          if [ ! -f "$arg" ]; then
            echo "$arg: cannot open file" >&2
            exit 1
          fi
          cp "$arg" "$LOG/$arg"
          : > "${arg%.*}.o"
          ;;
      esac
    done
    : > work-obj93.cf
    ;;
  -e)
    unit=""
    for arg in "$@"; do
      case "$arg" in
        -*) ;;
        *) unit="$arg" ;;
      esac
    done
    if [ ! -f "$unit.o" ]; then
      echo "cannot find entity or configuration $unit" >&2
      exit 1
    fi
    @MARKER@
    printf '#!/bin/sh\nexit 0\n' > "$unit"
    chmod +x "$unit"
    ;;
  -r)
    unit="$1"
    if [ ! -f "$unit" ]; then
      echo "cannot find $unit" >&2
      exit 1
    fi
    echo "$unit.vhd:30:5:@40ns:(assertion note): end of test"
    @RUN@
    ;;
  *)
    echo "unknown command $mode" >&2
    exit 2
    ;;
esac
"#;

/// One recorded simulator call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub cwd: PathBuf,
    pub args: Vec<String>,
}

pub struct FakeGhdl {
    dir: TempDir,
}

impl FakeGhdl {
    pub fn new() -> Self {
        Self::build("", ": > \"e~$unit.o\"", "")
    }

    /// Exits with status 1 and `message` on stderr whenever `flag` is used.
    pub fn failing_on(flag: &str, message: &str) -> Self {
        let prelude = format!(
            "if [ \"$mode\" = \"{}\" ]; then echo \"{}\" >&2; exit 1; fi",
            flag, message
        );
        Self::build(&prelude, ": > \"e~$unit.o\"", "")
    }

    /// Elaborates without writing the `e~<unit>.o` marker.
    pub fn without_elaboration_marker() -> Self {
        Self::build("", ":", "")
    }

    /// Elaborates normally, then deletes its own script so that later
    /// invocations cannot be started.
    pub fn vanishing_after_elaboration() -> Self {
        Self::build("", ": > \"e~$unit.o\"\n    rm -f \"$0\"", "")
    }

    /// Elaborates normally and also leaves `name`, which clean does not remove.
    pub fn with_stray_artifact(name: &str) -> Self {
        let marker = format!(": > \"e~$unit.o\"\n    : > \"{}\"", name);
        Self::build("", &marker, "")
    }

    /// Runs print an error assertion and exit non-zero.
    pub fn with_failing_run() -> Self {
        Self::build(
            "",
            ": > \"e~$unit.o\"",
            "echo \"$unit.vhd:25:7:@30ns:(assertion error): bad output value\" >&2\n    exit 1",
        )
    }

    fn build(prelude: &str, marker: &str, run: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().to_str().unwrap().to_string();
        let script = SCRIPT
            .replace("@LOG@", &log)
            .replace("@PRELUDE@", prelude)
            .replace("@MARKER@", marker)
            .replace("@RUN@", run);

        let path = dir.path().join("fake-ghdl");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("invocations"), "").unwrap();
        Self { dir }
    }

    pub fn program(&self) -> PathBuf {
        self.dir.path().join("fake-ghdl")
    }

    pub fn simulator(&self) -> Simulator {
        Simulator::new(self.program().to_str().unwrap())
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        fs::read_to_string(self.dir.path().join("invocations"))
            .unwrap()
            .lines()
            .map(|line| {
                let (cwd, args) = line.split_once('\t').unwrap();
                Invocation {
                    cwd: PathBuf::from(cwd),
                    args: args.split_whitespace().map(str::to_string).collect(),
                }
            })
            .collect()
    }

    /// Contents of `file` as it was when the simulator analyzed it.
    pub fn analyzed(&self, file: &str) -> Option<String> {
        fs::read_to_string(self.dir.path().join(file)).ok()
    }
}

/// Copies `demos/<name>` into a fresh scratch directory.
pub fn demo_copy(name: &str) -> TempDir {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(&src).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

/// Text of a demo file.
pub fn demo_source(name: &str, file: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
        .join(file);
    fs::read_to_string(path).unwrap()
}

pub fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}
