mod common;

use std::collections::HashSet;

use anyhow::Result;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde_json::{json, Value};

use workery_server::auth::hash_password;
use workery_server::database::models::{NewUser, User};
use workery_server::database::QuerySettings;
use workery_server::error::ApiError;
use workery_server::session::{AccountState, Role};

async fn get_json(url: String, auth: &str) -> Result<(StatusCode, Value)> {
    let res = reqwest::Client::new().get(url).header(AUTHORIZATION, auth).send().await?;
    let status = res.status();
    Ok((status, res.json().await?))
}

fn ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn tenant_registry_pages_by_keyset() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let mut created = Vec::new();
    for n in 0..30 {
        created.push(common::insert_tenant(&pool, &format!("Franchise {}", n), 1).await?);
    }
    created.sort_unstable_by(|a, b| b.cmp(a));

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(created[0], Role::Executive)).await?;

    let mut seen = Vec::new();
    let mut token = 0;
    loop {
        let (status, body) = get_json(
            app.url(&format!("/api/v1/tenants?page_size=10&page_token={}", token)),
            &auth,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_size"], 30);

        let page = ids(&body);
        if page.is_empty() {
            assert!(body.get("next_page_token").is_none());
            break;
        }
        assert!(page.len() <= 10);
        assert_eq!(body["next_page_token"].as_i64(), page.last().copied());
        token = body["next_page_token"].as_i64().unwrap_or_default();
        seen.extend(page);
    }

    assert_eq!(seen, created);
    Ok(())
}

#[tokio::test]
async fn state_filter_counts_only_matching_rows() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "North", 1).await?;
    for n in 0..12 {
        let state = if n < 7 { 1 } else { 0 };
        common::insert_customer(&pool, tenant, &format!("Given{}", n), &format!("Last{:02}", n), state).await?;
    }

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Management)).await?;

    let (status, active) = get_json(app.url("/api/v1/customers?state=1"), &auth).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["count"], 7);
    assert_eq!(ids(&active).len(), 7);

    let (_, everyone) = get_json(app.url("/api/v1/customers"), &auth).await?;
    assert_eq!(everyone["count"], 12);

    let (status, _) = get_json(app.url("/api/v1/customers?state=active"), &auth).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn listings_never_cross_tenants() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let north = common::insert_tenant(&pool, "North", 1).await?;
    let south = common::insert_tenant(&pool, "South", 1).await?;
    for n in 0..4 {
        common::insert_customer(&pool, north, "Nora", &format!("North{}", n), 1).await?;
    }
    let mut south_ids = HashSet::new();
    for n in 0..3 {
        south_ids.insert(common::insert_customer(&pool, south, "Sam", &format!("South{}", n), 1).await?);
    }

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(south, Role::FrontlineStaff)).await?;

    let (status, body) = get_json(app.url("/api/v1/customers?limit=50"), &auth).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(ids(&body).into_iter().collect::<HashSet<_>>(), south_ids);
    Ok(())
}

#[tokio::test]
async fn offset_pages_cover_every_row_once() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "East", 1).await?;
    // Duplicate last names force the id tie-breaker to keep pages stable.
    for n in 0..12 {
        common::insert_customer(&pool, tenant, &format!("Given{}", n), if n % 2 == 0 { "Smith" } else { "Jones" }, 1)
            .await?;
    }

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Management)).await?;

    let mut seen = Vec::new();
    for offset in [0, 5, 10] {
        let (status, body) = get_json(app.url(&format!("/api/v1/customers?limit=5&offset={}", offset)), &auth).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 12);
        seen.extend(ids(&body));
    }

    assert_eq!(seen.len(), 12);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 12);
    Ok(())
}

#[tokio::test]
async fn search_matches_configured_columns() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "West", 1).await?;
    common::insert_customer(&pool, tenant, "Rodolfo", "Martinez", 1).await?;
    common::insert_customer(&pool, tenant, "Fatima", "Rodrigues", 1).await?;
    common::insert_customer(&pool, tenant, "Bob", "Frapples", 1).await?;
    common::insert_customer(&pool, tenant, "Percent%", "Literal", 1).await?;

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Management)).await?;

    let (status, body) = get_json(app.url("/api/v1/customers?search=rod"), &auth).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    // `%` is matched literally, not as a wildcard.
    let (_, body) = get_json(app.url("/api/v1/customers?search=t%25"), &auth).await?;
    assert_eq!(body["count"], 1);
    Ok(())
}

#[tokio::test]
async fn search_on_unsearchable_entity_is_not_implemented() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Central", 1).await?;

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Management)).await?;

    let (status, body) = get_json(app.url("/api/v1/associates?search=bob"), &auth).await?;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["code"], "NOT_IMPLEMENTED");
    Ok(())
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Harbour", 1).await?;

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Management)).await?;

    let (status, _) = get_json(app.url("/api/v1/customers?sort_field=password_hash"), &auth).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(app.url("/api/v1/tasks?customer_id=abc"), &auth).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn open_tasks_filter_by_customer() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Lakeside", 1).await?;
    let alice = common::insert_customer(&pool, tenant, "Alice", "Able", 1).await?;
    let bruno = common::insert_customer(&pool, tenant, "Bruno", "Baker", 1).await?;

    for (customer, closed) in [(alice, false), (alice, false), (alice, true), (bruno, false)] {
        sqlx::query("INSERT INTO task_items (tenant_id, customer_id, is_closed) VALUES ($1, $2, $3)")
            .bind(tenant)
            .bind(customer)
            .bind(closed)
            .execute(&pool)
            .await?;
    }

    let app = common::spawn_app(pool).await?;
    let auth = app.login_as(common::identity(tenant, Role::Associate)).await?;

    let (status, body) = get_json(app.url(&format!("/api/v1/tasks?customer_id={}", alice)), &auth).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (_, body) = get_json(app.url("/api/v1/tasks"), &auth).await?;
    assert_eq!(body["count"], 3);
    Ok(())
}

#[tokio::test]
async fn login_list_and_refresh() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Downtown", 1).await?;
    common::insert_customer(&pool, tenant, "Carla", "Client", 1).await?;
    sqlx::query(
        "INSERT INTO users (uuid, tenant_id, email, first_name, last_name, password_hash, state, role) \
         VALUES ($1, $2, $3, 'Mia', 'Manager', $4, 1, 2)",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(tenant)
    .bind("mia@example.com")
    .bind(hash_password("correct horse", 4)?)
    .execute(&pool)
    .await?;

    let app = common::spawn_app(pool).await?;
    let client = reqwest::Client::new();

    let wrong = client
        .post(app.url("/api/v1/login"))
        .json(&json!({ "email": "mia@example.com", "password": "battery staple" }))
        .send()
        .await?;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(app.url("/api/v1/login"))
        .json(&json!({ "email": "MIA@example.com", "password": "correct horse" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let login: Value = res.json().await?;
    assert_eq!(login["tenant_id"], tenant);
    assert_eq!(login["role"], 2);
    let access = format!("Bearer {}", login["access_token"].as_str().unwrap_or_default());
    assert_eq!(app.sessions.live_count().await, 1);

    let (status, body) = get_json(app.url("/api/v1/customers"), &access).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let res = client
        .post(app.url("/api/v1/refresh-token"))
        .json(&json!({ "value": login["refresh_token"] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let pair: Value = res.json().await?;
    assert_ne!(pair["access_token"], login["access_token"]);
    assert_eq!(app.sessions.live_count().await, 2);

    let renewed = format!("Bearer {}", pair["access_token"].as_str().unwrap_or_default());
    let (status, _) = get_json(app.url("/api/v1/profile"), &renewed).await?;
    assert_eq!(status, StatusCode::OK);

    // Access tokens are not accepted where a refresh token is expected.
    let res = client
        .post(app.url("/api/v1/refresh-token"))
        .json(&json!({ "value": login["access_token"] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_rejects_duplicate_email() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Uptown", 1).await?;

    let app = common::spawn_app(pool).await?;
    let client = reqwest::Client::new();
    let payload = json!({
        "tenant_id": tenant,
        "email": "new.hire@example.com",
        "password": "s3cret-pass",
        "first_name": "New",
        "last_name": "Hire"
    });

    let res = client.post(app.url("/api/v1/register")).json(&payload).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client.post(app.url("/api/v1/register")).json(&payload).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(app.url("/api/v1/login"))
        .json(&json!({ "email": "new.hire@example.com", "password": "s3cret-pass" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn concurrent_registrations_yield_one_conflict() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Riverside", 1).await?;

    let app = common::spawn_app(pool).await?;
    let client = reqwest::Client::new();
    let payload = json!({
        "tenant_id": tenant,
        "email": "twin@example.com",
        "password": "s3cret-pass",
        "first_name": "Twin",
        "last_name": "Racer"
    });

    let (a, b) = tokio::join!(
        client.post(app.url("/api/v1/register")).json(&payload).send(),
        client.post(app.url("/api/v1/register")).json(&payload).send(),
    );
    let mut statuses = vec![a?.status(), b?.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    Ok(())
}

#[tokio::test]
async fn duplicate_insert_maps_to_conflict() -> Result<()> {
    let Some(pool) = common::test_pool().await? else {
        return Ok(());
    };
    let tenant = common::insert_tenant(&pool, "Bayview", 1).await?;
    let settings = QuerySettings::from_config(&common::test_config().database);
    let new_user = NewUser {
        tenant_id: tenant,
        email: "dup@example.com".to_string(),
        first_name: "Dup".to_string(),
        last_name: "Licate".to_string(),
        password_hash: hash_password("pw", 4)?,
        state: AccountState::Active,
        role: Role::Associate,
        timezone: "utc".to_string(),
    };

    User::insert(&pool, &settings, &new_user).await?;
    let err = match User::insert(&pool, &settings, &new_user).await {
        Ok(_) => anyhow::bail!("second insert with the same email succeeded"),
        Err(e) => e,
    };
    assert!(err.is_unique_violation());
    assert_eq!(ApiError::from(err).status_code(), 409);
    Ok(())
}
