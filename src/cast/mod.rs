//! Casting through the external `ytcast` executable.

pub mod svtplay;

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{Error, Result};

pub use svtplay::SvtplayForwarder;

/// Length of a TV pairing code
pub const PAIRING_CODE_LEN: usize = 12;

/// Watch URL for a YouTube video id
pub fn youtube_watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Pairing codes are exactly twelve ASCII digits
pub fn is_pairing_code(code: &str) -> bool {
    code.len() == PAIRING_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Captured result of one ytcast run
#[derive(Debug)]
pub struct CastOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs ytcast with a bounded lifetime
#[derive(Debug, Clone)]
pub struct Caster {
    program: String,
    timeout: Duration,
}

impl Caster {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Cast `url` to `device`
    pub async fn cast(&self, device: &str, url: &str) -> Result<()> {
        tracing::info!("Casting {} to device {}", url, device);
        self.run(&["-d", device, url]).await.map(|_| ())
    }

    /// List known devices (ytcast's stdout, verbatim)
    pub async fn list_devices(&self) -> Result<String> {
        self.run(&["-l"]).await.map(|out| out.stdout)
    }

    /// Pair with a TV using the code it displays
    pub async fn pair(&self, code: &str) -> Result<()> {
        tracing::info!("Pairing with TV code {}", code);
        self.run(&["-p", code]).await.map(|_| ())
    }

    async fn run(&self, args: &[&str]) -> Result<CastOutput> {
        let quoted: Vec<String> = args.iter().map(|a| format!("{:?}", a)).collect();
        tracing::info!("exec {} {}", self.program, quoted.join(" "));

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::warn!("Failed to start {}: {}", self.program, e);
                Error::Internal(format!("failed to start {}", self.program))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!("{} timed out after {:?}", self.program, self.timeout);
                Error::Internal(format!("{} timed out", self.program))
            })??;

        let result = CastOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            tracing::warn!(
                "{} failed: exit={:?}\nstdout: {}\nstderr: {}",
                self.program,
                output.status.code(),
                result.stdout.trim(),
                result.stderr.trim()
            );
            return Err(Error::Internal(format!("{} failed", self.program)));
        }

        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_code_validation() {
        assert!(is_pairing_code("123456789012"));
        assert!(!is_pairing_code(""));
        assert!(!is_pairing_code("abc123"));
        assert!(!is_pairing_code("1234567890"));
        assert!(!is_pairing_code("1234567890123"));
        assert!(!is_pairing_code("12345678901a"));
        assert!(!is_pairing_code("１２３４５６７８９０１２"));
    }

    #[test]
    fn test_youtube_watch_url() {
        assert_eq!(
            youtube_watch_url("zbKjqHqy2no"),
            "https://www.youtube.com/watch?v=zbKjqHqy2no"
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let _guard = test_support::SPAWN_LOCK.lock().await;
        let caster = Caster::new("/nonexistent/ytcast", Duration::from_secs(1));
        assert!(matches!(caster.list_devices().await, Err(Error::Internal(_))));
    }

    #[cfg(unix)]
    mod process {
        use super::super::test_support::*;
        use super::*;
        use tempfile::TempDir;

        #[tokio::test]
        async fn test_cast_passes_device_and_url() {
            let _guard = SPAWN_LOCK.lock().await;
            let temp_dir = TempDir::new().unwrap();
            let trace = temp_dir.path().join("trace.txt");
            let exe = tracing_ytcast(temp_dir.path(), &trace);

            let caster = Caster::new(exe.to_string_lossy(), Duration::from_secs(10));
            caster.cast("tv-1", "https://youtu.be/abc123").await.unwrap();

            let args = std::fs::read_to_string(&trace).unwrap();
            assert_eq!(args, "-d tv-1 https://youtu.be/abc123");
        }

        #[tokio::test]
        async fn test_list_devices_returns_stdout() {
            let _guard = SPAWN_LOCK.lock().await;
            let temp_dir = TempDir::new().unwrap();
            let exe = fake_ytcast(temp_dir.path(), "echo device-one\necho device-two");

            let caster = Caster::new(exe.to_string_lossy(), Duration::from_secs(10));
            assert_eq!(caster.list_devices().await.unwrap(), "device-one\ndevice-two\n");
        }

        #[tokio::test]
        async fn test_non_zero_exit_is_an_error() {
            let _guard = SPAWN_LOCK.lock().await;
            let temp_dir = TempDir::new().unwrap();
            let exe = fake_ytcast(temp_dir.path(), "echo error 1>&2\nexit 1");

            let caster = Caster::new(exe.to_string_lossy(), Duration::from_secs(10));
            assert!(caster.pair("123456789012").await.is_err());
        }

        #[tokio::test]
        async fn test_timeout_kills_the_process() {
            let _guard = SPAWN_LOCK.lock().await;
            let temp_dir = TempDir::new().unwrap();
            let exe = fake_ytcast(temp_dir.path(), "sleep 5");

            let caster = Caster::new(exe.to_string_lossy(), Duration::from_millis(200));
            assert!(caster.cast("tv", "https://youtu.be/x").await.is_err());
        }
    }
}
