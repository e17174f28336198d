use std::{env, fs, path::PathBuf};

use crate::{
    config::get_config,
    error::{ErrorContext, LarderError},
    LarderResult,
};

pub fn home_path() -> String {
    env::var("HOME").unwrap_or_else(|_| {
        let username = env::var("USER")
            .or_else(|_| env::var("LOGNAME"))
            .unwrap_or_default();
        format!("/home/{username}")
    })
}

pub fn home_config_path() -> String {
    env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| format!("{}/.config", home_path()))
}

pub fn home_data_path() -> String {
    env::var("XDG_DATA_HOME").unwrap_or_else(|_| format!("{}/.local/share", home_path()))
}

/// Expands environment variables and a leading tilde in a path string.
///
/// Both `$VAR` and `${VAR}` forms are recognized; undefined variables are an
/// error, as are empty paths and unclosed `${` groups. Relative paths are
/// returned as-is.
pub fn build_path(path: &str) -> LarderResult<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return Err(LarderError::InvalidPath);
    }

    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => {
                let var_name = if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(LarderError::InvalidPath);
                    }
                    name
                } else {
                    let mut name = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_alphanumeric() || c == '_' {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    name
                };

                if var_name.is_empty() {
                    result.push('$');
                } else {
                    result.push_str(&env::var(&var_name)?);
                }
            }
            '~' if result.is_empty() => result.push_str(&home_path()),
            _ => result.push(c),
        }
    }

    Ok(PathBuf::from(result))
}

/// Creates the directory the registry database lives in, if missing.
pub fn setup_required_paths() -> LarderResult<()> {
    let db_path = get_config().get_db_path()?;
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating database directory {}", parent.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    #[serial]
    fn build_path_expands_variables() {
        with_env(
            vec![("LARDER_TEST_ROOT", Some("/srv/registry"))],
            || {
                let path = build_path("$LARDER_TEST_ROOT/larder.db").unwrap();
                assert_eq!(path, PathBuf::from("/srv/registry/larder.db"));

                let path = build_path("${LARDER_TEST_ROOT}/larder.db").unwrap();
                assert_eq!(path, PathBuf::from("/srv/registry/larder.db"));
            },
        );
    }

    #[test]
    #[serial]
    fn build_path_expands_tilde() {
        with_env(vec![("HOME", Some("/home/tester"))], || {
            let path = build_path("~/registry/larder.db").unwrap();
            assert_eq!(path, PathBuf::from("/home/tester/registry/larder.db"));
        });
    }

    #[test]
    #[serial]
    fn build_path_rejects_bad_input() {
        assert!(matches!(build_path(""), Err(LarderError::InvalidPath)));
        assert!(matches!(
            build_path("${UNCLOSED/larder.db"),
            Err(LarderError::InvalidPath)
        ));
        with_env(vec![("LARDER_TEST_UNSET", None)], || {
            assert!(matches!(
                build_path("$LARDER_TEST_UNSET/larder.db"),
                Err(LarderError::VarError(_))
            ));
        });
    }

    #[test]
    #[serial]
    fn home_data_path_honors_xdg() {
        with_env(
            vec![("XDG_DATA_HOME", Some("/custom/data"))],
            || {
                assert_eq!(home_data_path(), "/custom/data");
            },
        );
        with_env(
            vec![("XDG_DATA_HOME", None), ("HOME", Some("/home/tester"))],
            || {
                assert_eq!(home_data_path(), "/home/tester/.local/share");
            },
        );
    }
}
