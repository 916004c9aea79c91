use anyhow::Result;
use std::{
    io::{Read, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("..")
}

/// Builds the function binary for the host platform.
fn build_function(name: &str) -> Result<()> {
    let status = Command::new(env!("CARGO"))
        .current_dir(workspace_root())
        .args(["build", "--release", "-p", name])
        .status()?;
    if !status.success() {
        anyhow::bail!(status);
    }
    Ok(())
}

/// Builds the function and returns the path to its binary.
pub fn prepare_function(name: &str) -> Result<PathBuf> {
    build_function(name)?;
    let path = workspace_root()
        .join("target/release")
        .join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
    if !path.exists() {
        anyhow::bail!("Function binary not found at {}", path.display());
    }
    Ok(path)
}

/// Runs the function binary with `input` on stdin. Returns the JSON it wrote to
/// stdout and its logs.
pub fn run_function(
    path: PathBuf,
    input: serde_json::Value,
) -> Result<(serde_json::Value, String)> {
    run_function_with_payload(path, serde_json::to_string(&input)?)
}

/// Like [`run_function`], with a raw payload that need not be valid JSON.
pub fn run_function_with_payload(
    path: PathBuf,
    payload: String,
) -> Result<(serde_json::Value, String)> {
    let mut child = Command::new(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to open stdin"))?;

    let writer = std::thread::spawn(move || stdin.write_all(payload.as_bytes()));

    let mut output_bytes = Vec::new();
    child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to open stdout"))?
        .read_to_end(&mut output_bytes)?;
    let mut logs = String::new();
    child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("Failed to open stderr"))?
        .read_to_string(&mut logs)?;

    let status = child.wait()?;
    let written = writer
        .join()
        .map_err(|_| anyhow::anyhow!("Failed to write to stdin"))?;

    if !status.success() {
        anyhow::bail!(
            "Function returned non-zero exit code: {}, logs: {}",
            status,
            logs,
        );
    }
    written?;

    let output: serde_json::Value = serde_json::from_slice(&output_bytes)?;
    Ok((output, logs))
}
