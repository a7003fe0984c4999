//! Integration tests against a live Postgres instance via `#[sqlx::test]`.

use meepledb_db::{
    find_or_create_mechanic, find_or_create_publisher, get_game_by_source_url,
    list_game_mechanic_names, upsert_game_with_links, GameUpsert,
};

fn wingspan_upsert() -> GameUpsert {
    GameUpsert {
        title: "Wingspan".to_string(),
        description: Some("A bird-collection engine builder.".to_string()),
        difficulty: "2 - Medium Light".to_string(),
        play_time: "30-60 minutes".to_string(),
        game_type: "Strategy".to_string(),
        min_players: Some(1),
        max_players: Some(5),
        suggested_age: Some("10+".to_string()),
        publisher_id: None,
        main_image_url: Some("https://cf.geekdo-images.com/A__itemrep/img/pic1.jpg".to_string()),
        gallery_image_urls: vec![],
        source_url: "https://source.example/item/266192/wingspan".to_string(),
        is_coming_soon: false,
        is_for_sale: false,
        sale_price: None,
        sale_condition: None,
        is_expansion: false,
        parent_game_id: None,
        location_room: None,
        location_shelf: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_or_create_mechanic_is_idempotent(pool: sqlx::PgPool) {
    let first = find_or_create_mechanic(&pool, "Worker Placement")
        .await
        .expect("first create");
    let second = find_or_create_mechanic(&pool, "Worker Placement")
        .await
        .expect("second lookup");

    assert_eq!(first, second);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mechanics")
        .fetch_one(&pool)
        .await
        .expect("count mechanics");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_or_create_mechanic_dedupes_case_insensitively(pool: sqlx::PgPool) {
    let first = find_or_create_mechanic(&pool, "Engine Building")
        .await
        .expect("first create");
    let second = find_or_create_mechanic(&pool, "engine building")
        .await
        .expect("case-variant lookup");

    assert_eq!(first, second);

    let name: String = sqlx::query_scalar("SELECT name FROM mechanics WHERE id = $1")
        .bind(first)
        .fetch_one(&pool)
        .await
        .expect("fetch name");
    // First spelling wins.
    assert_eq!(name, "Engine Building");
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_or_create_publisher_is_idempotent(pool: sqlx::PgPool) {
    let first = find_or_create_publisher(&pool, "Stonemaier Games")
        .await
        .expect("first create");
    let second = find_or_create_publisher(&pool, "Stonemaier Games")
        .await
        .expect("second lookup");

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_game_twice_keeps_a_single_row(pool: sqlx::PgPool) {
    let mechanic = find_or_create_mechanic(&pool, "Engine Building")
        .await
        .expect("mechanic");

    let first = upsert_game_with_links(&pool, &wingspan_upsert(), &[mechanic])
        .await
        .expect("first import");

    let mut updated = wingspan_upsert();
    updated.max_players = Some(7);
    let second = upsert_game_with_links(&pool, &updated, &[mechanic])
        .await
        .expect("re-import");

    assert_eq!(first.id, second.id);
    assert_eq!(second.max_players, Some(7));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM games")
        .fetch_one(&pool)
        .await
        .expect("count games");
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_replaces_mechanic_linkage(pool: sqlx::PgPool) {
    let worker = find_or_create_mechanic(&pool, "Worker Placement")
        .await
        .expect("mechanic");
    let engine = find_or_create_mechanic(&pool, "Engine Building")
        .await
        .expect("mechanic");

    let game = upsert_game_with_links(&pool, &wingspan_upsert(), &[worker])
        .await
        .expect("first import");
    assert_eq!(
        list_game_mechanic_names(&pool, game.id)
            .await
            .expect("names"),
        vec!["Worker Placement".to_string()]
    );

    let game = upsert_game_with_links(&pool, &wingspan_upsert(), &[engine])
        .await
        .expect("re-import with new mechanics");
    assert_eq!(
        list_game_mechanic_names(&pool, game.id)
            .await
            .expect("names"),
        vec!["Engine Building".to_string()]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn mechanic_shared_across_two_games_stays_single(pool: sqlx::PgPool) {
    let mechanic = find_or_create_mechanic(&pool, "Worker Placement")
        .await
        .expect("mechanic");

    upsert_game_with_links(&pool, &wingspan_upsert(), &[mechanic])
        .await
        .expect("first game");

    let mut other = wingspan_upsert();
    other.title = "Agricola".to_string();
    other.source_url = "https://source.example/item/31260/agricola".to_string();
    upsert_game_with_links(&pool, &other, &[mechanic])
        .await
        .expect("second game");

    let mechanic_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mechanics")
        .fetch_one(&pool)
        .await
        .expect("count mechanics");
    assert_eq!(mechanic_count, 1);

    let link_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM game_mechanics WHERE mechanic_id = $1")
            .bind(mechanic)
            .fetch_one(&pool)
            .await
            .expect("count links");
    assert_eq!(link_count, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_game_by_source_url_round_trips(pool: sqlx::PgPool) {
    upsert_game_with_links(&pool, &wingspan_upsert(), &[])
        .await
        .expect("import");

    let found = get_game_by_source_url(&pool, "https://source.example/item/266192/wingspan")
        .await
        .expect("lookup")
        .expect("game exists");
    assert_eq!(found.title, "Wingspan");

    let missing = get_game_by_source_url(&pool, "https://source.example/item/999/missing")
        .await
        .expect("lookup");
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn enum_check_constraint_rejects_arbitrary_difficulty(pool: sqlx::PgPool) {
    let result = sqlx::query(
        "INSERT INTO games (title, difficulty, play_time, game_type) \
         VALUES ('Bad Game', 'impossible', '1-2 hours', 'Strategy')",
    )
    .execute(&pool)
    .await;

    assert!(
        result.is_err(),
        "out-of-set difficulty must be rejected by the storage layer"
    );
}
