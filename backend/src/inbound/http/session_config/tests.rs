//! Unit tests for session configuration parsing.

use std::collections::HashMap;

use super::*;
use mockable::{DefaultEnv, MockEnv};
use rstest::rstest;
use uuid::Uuid;

struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("ledger-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write temporary key");
        Self { path }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: &[(&str, String)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_vars(key: &TempKeyFile) -> Vec<(&'static str, String)> {
    vec![
        (KEY_FILE_ENV, key.path_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]
}

fn with_override(
    mut vars: Vec<(&'static str, String)>,
    name: &'static str,
    value: &str,
) -> Vec<(&'static str, String)> {
    vars.retain(|(existing, _)| *existing != name);
    vars.push((name, value.to_owned()));
    vars
}

#[rstest]
fn release_accepts_explicit_settings() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let env = mock_env(&release_vars(&key));

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let mut vars = release_vars(&key);
    vars.retain(|(name, _)| *name != missing);

    let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .err()
        .expect("missing toggle fails");

    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "Sometimes")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_invalid_values(#[case] name: &'static str, #[case] value: &str) {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let vars = with_override(release_vars(&key), name, value);

    let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .err()
        .expect("invalid toggle fails");

    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_insecure_same_site_none() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let vars = with_override(
        with_override(release_vars(&key), SAMESITE_ENV, "None"),
        COOKIE_SECURE_ENV,
        "0",
    );

    let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .err()
        .expect("insecure SameSite=None fails");

    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let vars = with_override(release_vars(&key), ALLOW_EPHEMERAL_ENV, "1");

    let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .err()
        .expect("ephemeral keys rejected");

    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
    let env = mock_env(&release_vars(&key));

    let err = session_settings_from_env(&env, BuildMode::Release)
        .err()
        .expect("short key fails");

    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let key = TempKeyFile::new(SESSION_KEY_MIN_LEN);
    let vars = with_override(
        release_vars(&key),
        KEY_FILE_ENV,
        "/nonexistent/ledger/session_key",
    );

    let err = session_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .err()
        .expect("missing key file fails");

    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = mock_env(&[(KEY_FILE_ENV, "/nonexistent/ledger/session_key".to_owned())]);

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn reads_the_process_environment() {
    let _guard = env_lock::lock_env([
        (KEY_FILE_ENV, Some("/nonexistent/ledger/session_key".to_owned())),
        (COOKIE_SECURE_ENV, Some("0".to_owned())),
        (SAMESITE_ENV, Some("Strict".to_owned())),
        (ALLOW_EPHEMERAL_ENV, None::<String>),
    ]);

    let settings = session_settings_from_env(&DefaultEnv::new(), BuildMode::Debug)
        .expect("debug settings from process env");

    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case("1", Some(true))]
#[case(" YES ", Some(true))]
#[case("n", Some(false))]
#[case("False", Some(false))]
#[case("2", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
