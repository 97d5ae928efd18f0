use chirp_migrate::{
    MigrationError, embedded_migrations, load_migrations_from_dir, migration_status,
    run_migrations,
};
use chirp_schema::MigrationPlan;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;

async fn sqlite() -> (TempDir, DatabaseConnection) {
    let tmp = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", tmp.path().join("test.db").display());
    let db = Database::connect(url).await.unwrap();
    (tmp, db)
}

fn plan(json: &str) -> MigrationPlan {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn embedded_migrations_apply_once() {
    let (_tmp, db) = sqlite().await;
    let plans = embedded_migrations().unwrap();

    let first = run_migrations(&db, &plans).await.unwrap();
    assert_eq!(first.applied, vec![1, 2]);
    assert!(first.already_applied.is_empty());

    let second = run_migrations(&db, &plans).await.unwrap();
    assert!(second.applied.is_empty());
    assert_eq!(second.already_applied, vec![1, 2]);

    let status = migration_status(&db, &plans).await.unwrap();
    assert!(status.iter().all(|s| s.applied_at.is_some()));
    assert_eq!(status[1].label, "0002 create tweet");
}

#[tokio::test]
async fn migrated_schema_enforces_unique_username() {
    let (_tmp, db) = sqlite().await;
    run_migrations(&db, &embedded_migrations().unwrap())
        .await
        .unwrap();

    let insert = "INSERT INTO account (username, password) VALUES ('demo', 'x')";
    db.execute_unprepared(insert).await.unwrap();
    assert!(db.execute_unprepared(insert).await.is_err());

    db.execute_unprepared("INSERT INTO tweet (text) VALUES ('hello')")
        .await
        .unwrap();
}

#[tokio::test]
async fn status_before_migrating_lists_everything_pending() {
    let (_tmp, db) = sqlite().await;
    let plans = embedded_migrations().unwrap();
    let status = migration_status(&db, &plans).await.unwrap();
    assert_eq!(status.len(), 2);
    assert!(status.iter().all(|s| s.applied_at.is_none()));
}

#[tokio::test]
async fn failing_plan_rolls_back_and_keeps_earlier_ones() {
    let (_tmp, db) = sqlite().await;
    let plans = vec![
        plan(r#"{"version": 1, "comment": "ok", "actions": [
            {"type": "raw_sql", "sql": "CREATE TABLE first_table (id integer PRIMARY KEY)"}
        ]}"#),
        plan(r#"{"version": 2, "comment": "broken", "actions": [
            {"type": "raw_sql", "sql": "CREATE TABLE partial_table (id integer PRIMARY KEY)"},
            {"type": "raw_sql", "sql": "THIS IS NOT SQL"}
        ]}"#),
    ];

    let err = run_migrations(&db, &plans).await.unwrap_err();
    match err {
        MigrationError::Apply { label, .. } => assert_eq!(label, "0002 broken"),
        other => panic!("unexpected error {other:?}"),
    }

    assert!(db.execute_unprepared("SELECT * FROM first_table").await.is_ok());
    assert!(db.execute_unprepared("SELECT * FROM partial_table").await.is_err());

    let status = migration_status(&db, &plans).await.unwrap();
    assert!(status[0].applied_at.is_some());
    assert!(status[1].applied_at.is_none());
}

#[tokio::test]
async fn follow_up_plan_from_directory_alters_existing_tables() {
    let (tmp, db) = sqlite().await;
    let dir = tmp.path().join("migrations");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(
        dir.join("0001_create_account.json"),
        include_str!("../migrations/0001_create_account.json"),
    )
    .unwrap();
    std::fs::write(
        dir.join("0002_create_tweet.json"),
        include_str!("../migrations/0002_create_tweet.json"),
    )
    .unwrap();
    std::fs::write(
        dir.join("0003_tweet_lang.json"),
        r#"{"version": 3, "comment": "tweet lang", "actions": [
            {"type": "create_table", "table": "scratch",
             "columns": [{"name": "id", "type": "integer", "nullable": false, "primary_key": true}]},
            {"type": "add_column", "table": "tweet",
             "column": {"name": "lang", "type": "text", "nullable": true}},
            {"type": "add_constraint", "table": "tweet",
             "constraint": {"type": "index", "columns": ["lang"]}},
            {"type": "raw_sql", "sql": "UPDATE tweet SET lang = 'en' WHERE lang IS NULL"},
            {"type": "delete_table", "table": "scratch"}
        ]}"#,
    )
    .unwrap();

    run_migrations(&db, &embedded_migrations().unwrap())
        .await
        .unwrap();
    db.execute_unprepared("INSERT INTO tweet (text) VALUES ('before')")
        .await
        .unwrap();

    let plans = load_migrations_from_dir(&dir).unwrap();
    assert_eq!(plans.len(), 3);
    let report = run_migrations(&db, &plans).await.unwrap();
    assert_eq!(report.applied, vec![3]);

    assert!(
        db.execute_unprepared("INSERT INTO tweet (text, lang) VALUES ('after', 'de')")
            .await
            .is_ok()
    );
    assert!(db.execute_unprepared("SELECT * FROM scratch").await.is_err());
    let backfilled = db
        .execute_unprepared("UPDATE tweet SET lang = lang WHERE text = 'before' AND lang = 'en'")
        .await
        .unwrap();
    assert_eq!(backfilled.rows_affected(), 1);
    db.execute_unprepared("DROP INDEX ix_tweet__lang")
        .await
        .unwrap();
}
