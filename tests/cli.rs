use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

const WATER: &str = "3
water
O   0.000000   0.000000   0.117300
H   0.000000   0.757200  -0.469200
H   0.000000  -0.757200  -0.469200
";

fn generate_esp(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("generate_esp").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("PSI4_EXE")
        .env_remove("PSI4_NTHREADS")
        .env_remove("PSI4_MEMORY");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn water_dir() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("water.xyz"), WATER).unwrap();
    dir
}

#[test]
fn no_arguments_prints_usage() {
    let dir = tempdir().unwrap();
    let output = generate_esp(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage: generate_esp molecule.xyz"));
}

#[test]
fn two_arguments_prints_usage() {
    let dir = water_dir();
    let output = generate_esp(dir.path())
        .args(["water.xyz", "water.xyz"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage: generate_esp molecule.xyz"));
    assert!(!dir.path().join("water_esp.cube").exists());
}

#[test]
fn missing_engine_reports_install_hint() {
    let dir = water_dir();
    let output = generate_esp(dir.path())
        .args(["--psi4", "no-such-psi4-binary", "water.xyz"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Psi4 not installed"), "{out}");
    assert!(out.contains("conda install -c conda-forge psi4"), "{out}");
}

#[cfg(unix)]
mod stub_engine {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const CUBE: &str = "Psi4 Gaussian Cube File.
Property: ESP.
    1   0.000000   0.000000   0.000000
    2   0.500000   0.000000   0.000000
    2   0.000000   0.500000   0.000000
    2   0.000000   0.000000   0.500000
    8   8.000000   0.000000   0.000000   0.000000
  1.0E-02  1.0E-02  1.0E-02  1.0E-02  1.0E-02  1.0E-02  1.0E-02  1.0E-02
";

    /// 写一个假的 `psi4`，能处理 generate_esp 生成的两种输入。
    /// `write_cube` 控制 cube 步骤是否留下 ESP.cube，`fail` 让计算以非零退出。
    fn stub_psi4(dir: &Path, write_cube: bool, fail: bool) -> PathBuf {
        let marker = dir.join("psi4_invoked");
        let cube_step = if write_cube {
            format!("cat > ESP.cube <<'CUBE'\n{CUBE}CUBE\n")
        } else {
            String::new()
        };
        let failure = if fail {
            "echo 'PSIO_ERROR: unit 32' >&2\nexit 1\n"
        } else {
            ""
        };
        let script = format!(
            r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "1.9.1"
  exit 0
fi
touch "{marker}"
input="$3"
output="$4"
{failure}if grep -q "cubeprop(wfn)" "$input"; then
{cube_step}  echo "cubeprop done" > "$output"
else
  wfn=$(sed -n "s/^wfn.to_file('\(.*\)')$/\1/p" "$input" | sed 's/\\\\/\\/g')
  : > "$wfn"
  printf '  @DF-RKS Final Energy:   -76.36524354636022\n\nESP-GEN ENERGY -76.365243546360\n' > "$output"
fi
exit 0
"#,
            marker = marker.display(),
        );

        let path = dir.join("fake-psi4");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn full_run_renames_cube() {
        let dir = water_dir();
        let psi4 = stub_psi4(dir.path(), true, false);

        let output = generate_esp(dir.path())
            .arg("--psi4")
            .arg(&psi4)
            .arg("water.xyz")
            .output()
            .unwrap();

        let out = stdout(&output);
        assert!(output.status.success(), "{out}");
        assert!(dir.path().join("water_esp.cube").exists());
        assert!(!dir.path().join("ESP.cube").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("water_esp.cube")).unwrap(),
            CUBE
        );
        assert!(out.contains("SCF Energy: -76.365244 Hartree"), "{out}");
        assert!(out.contains("ESP cube file created: water_esp.cube"), "{out}");
        assert!(out.contains("./charge_optimizer water.xyz water_esp.cube"), "{out}");
        assert!(out.contains("Grid dimensions: 2 x 2 x 2"), "{out}");
    }

    #[test]
    fn missing_cube_fails_without_output() {
        let dir = water_dir();
        let psi4 = stub_psi4(dir.path(), false, false);

        let output = generate_esp(dir.path())
            .arg("--psi4")
            .arg(&psi4)
            .arg("water.xyz")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(stdout(&output).contains("ESP.cube not generated"));
        assert!(!dir.path().join("water_esp.cube").exists());
    }

    #[test]
    fn missing_input_never_invokes_engine() {
        let dir = tempdir().unwrap();
        let psi4 = stub_psi4(dir.path(), true, false);

        let output = generate_esp(dir.path())
            .arg("--psi4")
            .arg(&psi4)
            .arg("missing.xyz")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(stdout(&output).contains("File not found: missing.xyz"));
        assert!(!dir.path().join("psi4_invoked").exists());
    }

    #[test]
    fn engine_failure_is_reported() {
        let dir = water_dir();
        let psi4 = stub_psi4(dir.path(), true, true);

        let output = generate_esp(dir.path())
            .arg("--psi4")
            .arg(&psi4)
            .arg("water.xyz")
            .output()
            .unwrap();

        let out = stdout(&output);
        assert_eq!(output.status.code(), Some(1));
        assert!(out.contains("External command failed"), "{out}");
        assert!(out.contains("PSIO_ERROR"), "{out}");
        assert!(!dir.path().join("water_esp.cube").exists());
    }
}
