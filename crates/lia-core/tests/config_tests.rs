use std::io::Write;

use lia_core::config::{parse_dotenv_in, Config};

#[test]
fn local_dotenv_wins_over_plain_dotenv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut local = std::fs::File::create(dir.path().join(".env.local")).expect("create");
    writeln!(local, "LIA_CFG_TEST_MODEL=from-local").expect("write");
    let mut plain = std::fs::File::create(dir.path().join(".env")).expect("create");
    writeln!(plain, "LIA_CFG_TEST_MODEL=from-env\nLIA_CFG_TEST_ONLY_ENV=yes").expect("write");

    let map = parse_dotenv_in(dir.path());
    assert_eq!(map.get("LIA_CFG_TEST_MODEL").map(String::as_str), Some("from-local"));
    assert_eq!(map.get("LIA_CFG_TEST_ONLY_ENV").map(String::as_str), Some("yes"));
}

#[test]
fn missing_dotenv_files_are_fine() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(parse_dotenv_in(dir.path()).is_empty());
}

#[test]
fn config_reads_values_from_dotenv_map() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(".env"),
        "OPENAI_MODEL=gpt-test\nOPENAI_MAX_TOKENS=123\nCACHE_TTL_S=nope\n",
    )
    .expect("write");
    let config = Config::from_map(&parse_dotenv_in(dir.path()));
    // Process env may override these in CI; only assert when unset there.
    if std::env::var("OPENAI_MODEL").is_err() {
        assert_eq!(config.openai_model, "gpt-test");
    }
    if std::env::var("OPENAI_MAX_TOKENS").is_err() {
        assert_eq!(config.openai_max_tokens, 123);
    }
    if std::env::var("CACHE_TTL_S").is_err() {
        assert_eq!(config.cache_ttl_s, 300);
    }
}
