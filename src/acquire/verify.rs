use anyhow::Result;
use log::debug;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;
use crate::runtime::{ProbeOutcome, Runtime};

/// The only argument the downloaded binary is probed with.
pub const VERSION_QUERY_ARG: &str = "--version";

/// Runs `<path> --version` with its output hidden and requires exit code 0 within `timeout`.
/// Anything else, including a failure to start it, is [`Error::VerificationFailed`].
#[tracing::instrument(skip(runtime))]
pub async fn verify<R: Runtime>(runtime: &R, path: &Path, timeout: Duration) -> Result<()> {
    let failed = |reason: String| -> anyhow::Error {
        Error::VerificationFailed {
            path: path.to_path_buf(),
            reason,
        }
        .into()
    };

    let outcome = runtime
        .probe(path, &[VERSION_QUERY_ARG.to_string()], timeout)
        .await
        .map_err(|e| failed(format!("{:#}", e)))?;

    match outcome {
        ProbeOutcome::Exited(Some(0)) => {
            debug!("{} {} exited successfully", path.display(), VERSION_QUERY_ARG);
            Ok(())
        }
        ProbeOutcome::Exited(Some(code)) => Err(failed(format!(
            "`{}` exited with code {}",
            VERSION_QUERY_ARG, code
        ))),
        ProbeOutcome::Exited(None) => Err(failed(format!(
            "`{}` was terminated by a signal",
            VERSION_QUERY_ARG
        ))),
        ProbeOutcome::TimedOut => Err(failed(format!(
            "`{}` did not finish within {}s",
            VERSION_QUERY_ARG,
            timeout.as_secs_f64()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::classify;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn runtime_probing(outcome: Result<ProbeOutcome>) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        let outcome = std::sync::Mutex::new(Some(outcome));
        runtime
            .expect_probe()
            .with(
                eq(Path::new("/home/user/.phantom/bin/phantom").to_path_buf()),
                eq(vec!["--version".to_string()]),
                eq(Duration::from_secs(5)),
            )
            .times(1)
            .returning(move |_, _, _| outcome.lock().unwrap().take().unwrap());
        runtime
    }

    async fn run(outcome: Result<ProbeOutcome>) -> Result<()> {
        let runtime = runtime_probing(outcome);
        verify(
            &runtime,
            Path::new("/home/user/.phantom/bin/phantom"),
            Duration::from_secs(5),
        )
        .await
    }

    fn reason_of(err: &anyhow::Error) -> String {
        match classify(err) {
            Some(Error::VerificationFailed { reason, .. }) => reason.clone(),
            other => panic!("Expected VerificationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_success() {
        assert!(run(Ok(ProbeOutcome::Exited(Some(0)))).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_non_zero_exit() {
        let err = run(Ok(ProbeOutcome::Exited(Some(1)))).await.unwrap_err();
        assert!(reason_of(&err).contains("exited with code 1"));
    }

    #[tokio::test]
    async fn test_verify_signal() {
        let err = run(Ok(ProbeOutcome::Exited(None))).await.unwrap_err();
        assert!(reason_of(&err).contains("signal"));
    }

    #[tokio::test]
    async fn test_verify_timeout() {
        let err = run(Ok(ProbeOutcome::TimedOut)).await.unwrap_err();
        assert!(reason_of(&err).contains("within 5s"));
    }

    #[tokio::test]
    async fn test_verify_spawn_error() {
        let err = run(Err(anyhow::anyhow!("Exec format error")))
            .await
            .unwrap_err();
        assert!(reason_of(&err).contains("Exec format error"));
    }
}
