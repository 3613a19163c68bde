use std::io::IsTerminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: String },
    NoTerminal,
}

pub(crate) fn is_interactive() -> bool {
    non_interactive_reason().is_none()
}

pub(crate) fn non_interactive_reason() -> Option<NonInteractiveReason> {
    if std::env::var("SHIPSET_NO_TTY").is_ok() {
        return Some(NonInteractiveReason::ExplicitDisable);
    }

    if std::env::var("SHIPSET_FORCE_TTY").is_ok() {
        return None;
    }

    if let Some(env_var) = detect_ci_env_var() {
        return Some(NonInteractiveReason::CiDetected { env_var });
    }

    if !std::io::stdin().is_terminal() {
        return Some(NonInteractiveReason::NoTerminal);
    }

    None
}

fn detect_ci_env_var() -> Option<String> {
    const CI_ENV_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
    ];

    for var in CI_ENV_VARS {
        if std::env::var(var).is_ok() {
            return Some((*var).to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ALL_VARS: &[&str] = &[
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
        "BUILDKITE",
        "SHIPSET_NO_TTY",
        "SHIPSET_FORCE_TTY",
    ];

    fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().expect("mutex poisoned");

        let mut old_values: Vec<(&str, Option<String>)> = Vec::new();

        for var in ALL_VARS {
            old_values.push((var, std::env::var(var).ok()));
            // SAFETY: Test code runs sequentially with ENV_MUTEX held.
            unsafe { std::env::remove_var(var) };
        }

        for (key, value) in vars {
            // SAFETY: Test code runs sequentially with ENV_MUTEX held.
            unsafe { std::env::set_var(key, value) };
        }

        let result = f();

        for (key, old_value) in old_values {
            match old_value {
                // SAFETY: Test code runs sequentially with ENV_MUTEX held.
                Some(v) => unsafe { std::env::set_var(key, v) },
                // SAFETY: Test code runs sequentially with ENV_MUTEX held.
                None => unsafe { std::env::remove_var(key) },
            }
        }

        result
    }

    #[test]
    fn explicit_disable_wins_over_force() {
        with_env(&[("SHIPSET_NO_TTY", "1"), ("SHIPSET_FORCE_TTY", "1")], || {
            assert_eq!(
                non_interactive_reason(),
                Some(NonInteractiveReason::ExplicitDisable)
            );
        });
    }

    #[test]
    fn force_tty_overrides_ci_detection() {
        with_env(&[("CI", "true"), ("SHIPSET_FORCE_TTY", "1")], || {
            assert!(is_interactive());
        });
    }

    #[test]
    fn ci_env_var_disables_interactivity() {
        with_env(&[("GITHUB_ACTIONS", "true")], || {
            assert_eq!(
                non_interactive_reason(),
                Some(NonInteractiveReason::CiDetected {
                    env_var: "GITHUB_ACTIONS".to_string()
                })
            );
        });
    }

    #[test]
    fn no_ci_vars_detected_when_unset() {
        with_env(&[], || {
            assert!(detect_ci_env_var().is_none());
        });
    }
}
