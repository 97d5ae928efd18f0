use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use sea_orm::{ConnectionTrait, Database};
use std::fs;
use tempfile::TempDir;

fn chirp() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("chirp"));
    cmd.env("NO_COLOR", "1")
        .env_remove("DATABASE_URL")
        .env_remove("DEBUG")
        .env_remove("SECRET_KEY")
        .env_remove("ALLOWED_HOSTS")
        .env_remove("RUST_LOG");
    cmd
}

fn sqlite_url(tmp: &TempDir) -> String {
    format!("sqlite://{}?mode=rwc", tmp.path().join("cli.db").display())
}

#[test]
fn no_args_shows_help() {
    chirp()
        .assert()
        .success()
        .stdout(predicate::str::contains("chirp"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn help_lists_commands() {
    chirp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wait-db"))
        .stdout(predicate::str::contains("bootstrap"));
}

#[test]
fn sql_prints_postgres_ddl_by_default() {
    chirp()
        .arg("sql")
        .assert()
        .success()
        .stdout(predicate::str::contains("0001 create account"))
        .stdout(predicate::str::contains("CREATE TABLE \"tweet\""))
        .stdout(predicate::str::contains("ON DELETE CASCADE"));
}

#[test]
fn sql_for_sqlite() {
    chirp()
        .args(["sql", "--backend", "sqlite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AUTOINCREMENT"));
}

#[test]
fn sql_from_broken_dir_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("0001_bad.json"), "{ nope").unwrap();
    chirp()
        .args(["sql", "--dir"])
        .arg(tmp.path())
        .assert()
        .failure();
}

#[test]
fn migrate_twice_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let url = sqlite_url(&tmp);

    chirp()
        .args(["migrate", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied migrations: 2"));

    chirp()
        .args(["migrate", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending migrations."));
}

#[test]
fn bootstrap_twice_succeeds() {
    let tmp = TempDir::new().unwrap();
    let url = sqlite_url(&tmp);
    let media = tmp.path().join("media");

    for _ in 0..2 {
        chirp()
            .args(["bootstrap", "--debug", "true", "--database-url", &url, "--media-root"])
            .arg(&media)
            .assert()
            .success()
            .stdout(predicate::str::contains("Demo account: demo"));
    }
}

#[test]
fn bootstrap_fails_loudly_when_a_migration_cannot_apply() {
    let tmp = TempDir::new().unwrap();
    let url = sqlite_url(&tmp);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let db = Database::connect(url.as_str()).await.unwrap();
        db.execute_unprepared("CREATE TABLE tweet (legacy TEXT)")
            .await
            .unwrap();
        db.close().await.unwrap();
    });

    chirp()
        .args(["bootstrap", "--debug", "true", "--database-url", &url, "--media-root"])
        .arg(tmp.path().join("media"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("fatal error"))
        .stdout(predicate::str::contains("0002 create tweet"))
        .stdout(predicate::str::contains("Demo account").not());

    chirp()
        .args(["status", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("applied 0001 create account"))
        .stdout(predicate::str::contains("pending 0002 create tweet"));
}

#[test]
fn status_shows_migrations_and_hides_secrets() {
    let tmp = TempDir::new().unwrap();
    let url = sqlite_url(&tmp);

    chirp()
        .args(["migrate", "--database-url", &url])
        .assert()
        .success();

    chirp()
        .args(["status", "--secret-key", "topsecret", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied migrations: 2/2"))
        .stdout(predicate::str::contains("applied 0002 create tweet"))
        .stdout(predicate::str::contains("topsecret").not());
}

#[test]
fn wait_db_returns_when_reachable() {
    let tmp = TempDir::new().unwrap();
    chirp()
        .args(["wait-db", "--database-url", &sqlite_url(&tmp)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database is ready."));
}

#[test]
fn serve_refuses_to_start_without_secret_key() {
    chirp()
        .args(["serve", "--allowed-hosts", "web"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("SECRET_KEY"));
}
