mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

async fn create(app: &common::TestApp, name: &str, email: &str) -> Result<Value> {
    let (status, body) = app
        .send(
            Method::POST,
            "/contact/contacts",
            Some(&app.admin_token()),
            Some(json!({ "name": name, "title": "Editor", "email": email })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    Ok(body)
}

#[tokio::test]
async fn non_admin_cannot_create_contact() -> Result<()> {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/contact/contacts",
            Some(&app.member_token()),
            Some(json!({ "name": "Ann", "title": "Editor", "email": "ann@example.com" })),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Forbidden, not an admin" }));
    Ok(())
}

#[tokio::test]
async fn admin_mutations_gate_every_endpoint() -> Result<()> {
    let app = common::TestApp::new().await;
    let contact = create(&app, "Ann", "ann@example.com").await?;
    let id = contact["id"].as_str().unwrap_or_default().to_string();
    let item = format!("/contact/contacts/{id}");

    let cases = [
        (Method::POST, "/contact/contacts".to_string(), json!({ "name": "B", "title": "T", "email": "b@x.io" })),
        (Method::PUT, item.clone(), json!({ "title": "Chief" })),
        (Method::DELETE, item.clone(), json!({})),
        (Method::PUT, "/contact/contacts/reorder".to_string(), json!({ "orderedIds": [id.clone()] })),
        (Method::POST, "/contact/contacts/reorder".to_string(), json!({ "orderedIds": [id] })),
    ];

    for (method, uri, body) in cases {
        let (status, _) = app.send(method.clone(), &uri, None, Some(body.clone())).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");

        let (status, body) = app.send(method.clone(), &uri, Some(&app.member_token()), Some(body)).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["message"], "Forbidden, not an admin");
    }
    Ok(())
}

#[tokio::test]
async fn create_contact_requires_name_title_email() -> Result<()> {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/contact/contacts",
            Some(&app.admin_token()),
            Some(json!({ "name": "Ann", "email": "ann@example.com" })),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name, title and email are required");
    Ok(())
}

#[tokio::test]
async fn created_contact_defaults_position_zero() -> Result<()> {
    let app = common::TestApp::new().await;
    let contact = create(&app, "Ann", "ann@example.com").await?;

    assert_eq!(contact["name"], "Ann");
    assert_eq!(contact["position"], 0);
    assert!(contact["createdAt"].is_string());
    assert!(contact["updatedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn list_is_sorted_and_always_has_avatar_key() -> Result<()> {
    let app = common::TestApp::new().await;
    let ann = create(&app, "Ann", "ann@example.com").await?;
    let ada = create(&app, "Ada", "ada@example.com").await?;

    let uri = format!("/contact/contacts/{}", ann["id"].as_str().unwrap_or_default());
    app.send(Method::PUT, &uri, Some(&app.admin_token()), Some(json!({ "position": 5 }))).await?;

    // Any authenticated user may read the list
    let (status, body) = app.send(Method::GET, "/contact/contacts", Some(&app.member_token()), None).await?;
    assert_eq!(status, StatusCode::OK);

    let contacts = body.as_array().cloned().unwrap_or_default();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["id"], ada["id"]);
    assert_eq!(contacts[0]["avatarUrl"], "https://cdn.example.com/ada.png");
    assert_eq!(contacts[1]["id"], ann["id"]);

    let ann_obj = contacts[1].as_object().cloned().unwrap_or_default();
    assert_eq!(ann_obj.get("avatarUrl"), Some(&Value::Null));

    let positions: Vec<i64> = contacts.iter().filter_map(|c| c["position"].as_i64()).collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[tokio::test]
async fn reorder_assigns_positions_in_given_order() -> Result<()> {
    let app = common::TestApp::new().await;
    let a = create(&app, "A", "a@example.com").await?;
    let b = create(&app, "B", "b@example.com").await?;
    let c = create(&app, "C", "c@example.com").await?;

    let (status, body) = app
        .send(
            Method::PUT,
            "/contact/contacts/reorder",
            Some(&app.admin_token()),
            Some(json!({ "orderedIds": [a["id"], b["id"], c["id"]] })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Contacts reordered" }));

    // Now reverse it through the POST alias
    app.send(
        Method::POST,
        "/contact/contacts/reorder",
        Some(&app.admin_token()),
        Some(json!({ "orderedIds": [c["id"], b["id"], a["id"]] })),
    )
    .await?;

    let (_, list) = app.send(Method::GET, "/contact/contacts", Some(&app.admin_token()), None).await?;
    let got: Vec<(Value, Value)> = list
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|x| (x["id"].clone(), x["position"].clone()))
        .collect();
    assert_eq!(
        got,
        vec![(c["id"].clone(), json!(0)), (b["id"].clone(), json!(1)), (a["id"].clone(), json!(2))]
    );
    Ok(())
}

#[tokio::test]
async fn reorder_ignores_unknown_ids_and_keeps_last_duplicate() -> Result<()> {
    let app = common::TestApp::new().await;
    let a = create(&app, "A", "a@example.com").await?;
    let b = create(&app, "B", "b@example.com").await?;
    let unknown = uuid::Uuid::new_v4().to_string();

    let (status, body) = app
        .send(
            Method::PUT,
            "/contact/contacts/reorder",
            Some(&app.admin_token()),
            Some(json!({ "orderedIds": [a["id"], unknown, b["id"], a["id"]] })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Contacts reordered" }));

    let (_, list) = app.send(Method::GET, "/contact/contacts", Some(&app.admin_token()), None).await?;
    let got: Vec<(Value, Value)> = list
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|x| (x["id"].clone(), x["position"].clone()))
        .collect();
    assert_eq!(got, vec![(b["id"].clone(), json!(2)), (a["id"].clone(), json!(3))]);
    Ok(())
}

#[tokio::test]
async fn update_contact_rejects_invalid_fields() -> Result<()> {
    let app = common::TestApp::new().await;
    let ann = create(&app, "Ann", "ann@example.com").await?;
    let uri = format!("/contact/contacts/{}", ann["id"].as_str().unwrap_or_default());

    for body in [
        json!({ "name": "" }),
        json!({ "title": "   " }),
        json!({ "email": "" }),
        json!({ "position": -1 }),
    ] {
        let (status, reply) = app.send(Method::PUT, &uri, Some(&app.admin_token()), Some(body.clone())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(reply["message"].is_string());
    }

    let (_, list) = app.send(Method::GET, "/contact/contacts", Some(&app.admin_token()), None).await?;
    assert_eq!(list[0]["name"], "Ann");
    assert_eq!(list[0]["position"], 0);
    Ok(())
}

#[tokio::test]
async fn reorder_requires_non_empty_list() -> Result<()> {
    let app = common::TestApp::new().await;

    for body in [json!({}), json!({ "orderedIds": [] }), json!({ "orderedIds": ["nope"] })] {
        let (status, body) = app
            .send(Method::PUT, "/contact/contacts/reorder", Some(&app.admin_token()), Some(body))
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
    Ok(())
}

#[tokio::test]
async fn update_contact_changes_only_given_fields() -> Result<()> {
    let app = common::TestApp::new().await;
    let ann = create(&app, "Ann", "ann@example.com").await?;
    let uri = format!("/contact/contacts/{}", ann["id"].as_str().unwrap_or_default());

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&app.admin_token()), Some(json!({ "title": "Managing Editor" })))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Managing Editor");
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "ann@example.com");
    Ok(())
}

#[tokio::test]
async fn update_and_delete_missing_contact_is_404() -> Result<()> {
    let app = common::TestApp::new().await;
    let uri = format!("/contact/contacts/{}", uuid::Uuid::new_v4());

    let (status, body) = app.send(Method::PUT, &uri, Some(&app.admin_token()), Some(json!({ "title": "T" }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Contact not found" }));

    let (status, _) = app.send(Method::DELETE, &uri, Some(&app.admin_token()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_contact_removes_it() -> Result<()> {
    let app = common::TestApp::new().await;
    let ann = create(&app, "Ann", "ann@example.com").await?;
    let uri = format!("/contact/contacts/{}", ann["id"].as_str().unwrap_or_default());

    let (status, body) = app.send(Method::DELETE, &uri, Some(&app.admin_token()), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, list) = app.send(Method::GET, "/contact/contacts", Some(&app.admin_token()), None).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn admin_emails_lists_admins_only() -> Result<()> {
    let app = common::TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/contact/admin-emails", Some(&app.member_token()), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["ada@example.com"]));
    Ok(())
}
