//! Platform probes.

use super::command::CommandRunner;

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`, `TF_BUILD`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
        || std::env::var("TF_BUILD").is_ok()
}

/// Check if running as root/Administrator.
///
/// On Windows `net session` only succeeds from an elevated token, so the
/// probe goes through the runner like every other external query.
pub fn is_elevated(runner: &dyn CommandRunner) -> bool {
    #[cfg(unix)]
    {
        let _ = runner;
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        runner.run("net", &["session"]).success
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = runner;
        false
    }
}
