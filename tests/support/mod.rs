#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard, OnceLock};

pub const LINUX_TRIPLE: &str = "x86_64-unknown-linux-gnu";
pub const MAC_ARM_TRIPLE: &str = "arm64-apple-macosx";

// Manifest with one linux variant and one universal mac variant.
pub fn sample_manifest(name: &str) -> Value {
    json!({
        "schemaVersion": "1.0",
        "artifacts": {
            name: {
                "type": "executable",
                "version": "1.6.18",
                "variants": [
                    {"path": "bin/linux/tool", "supportedTriples": [LINUX_TRIPLE]},
                    {"path": "bin/mac/tool", "supportedTriples": ["x86_64-apple-macosx", MAC_ARM_TRIPLE]}
                ]
            }
        }
    })
}

/// Create `root/info.json` plus empty files for every variant path.
pub fn write_bundle(root: &Path, manifest: &Value) -> Result<()> {
    fs::create_dir_all(root).with_context(|| format!("creating {}", root.display()))?;
    fs::write(root.join("info.json"), serde_json::to_vec_pretty(manifest)?)?;
    if let Some(artifacts) = manifest.get("artifacts").and_then(Value::as_object) {
        for artifact in artifacts.values() {
            let variants = artifact.get("variants").and_then(Value::as_array);
            for variant in variants.into_iter().flatten() {
                if let Some(rel) = variant.get("path").and_then(Value::as_str) {
                    let path = root.join(rel);
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, "#!/bin/sh\nexit 0\n")?;
                }
            }
        }
    }
    Ok(())
}

pub fn local_build_root(base: &Path, repository: &str, bundle: &str) -> PathBuf {
    base.join(".build/artifacts")
        .join(repository.to_lowercase())
        .join(bundle)
}

// Serializes script creation and spawning so a fork in one test cannot
// inherit another test's still-open script file handle (ETXTBSY).
pub fn spawn_guard() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let mutex = LOCK.get_or_init(|| Mutex::new(()));
    mutex.lock().unwrap_or_else(|err| err.into_inner())
}

/// Shell script standing in for `<toolchain> -print-target-info`.
#[cfg(unix)]
pub fn fake_toolchain(dir: &Path, body: &str) -> Result<PathBuf> {
    let path = dir.join("fake-toolchain");
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("writing {}", path.display()))?;
    make_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
pub fn toolchain_printing(dir: &Path, triple: &str) -> Result<PathBuf> {
    let payload = json!({
        "compilerVersion": "fake 1.0",
        "target": {
            "triple": format!("{triple}14.0"),
            "unversionedTriple": triple,
        }
    });
    fake_toolchain(
        dir,
        &format!(
            "[ \"$1\" = \"-print-target-info\" ] || exit 64\ncat <<'EOF'\n{payload}\nEOF"
        ),
    )
}

#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

pub fn artifact_path_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_artifact-path"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        anyhow::bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
