use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::json;

use crate::test::{send, test_app};

async fn seed_surveys(app: &axum::Router, n: usize) {
    for i in 0..n {
        let creator = if i % 2 == 0 {
            "even@example.com"
        } else {
            "odd@example.com"
        };
        let status = if i < 3 { "DRAFT" } else { "ACTIVE" };

        let (status_code, _) = send(
            app,
            "POST",
            "/api/surveys/create",
            Some(json!({
                "title": format!("Survey {i:02}"),
                "description": format!("Description {i:02}"),
                "creatorEmail": creator,
                "status": status,
            })),
        )
        .await;
        assert_eq!(status_code, StatusCode::OK);
    }
}

#[tokio::test]
async fn pages_are_bounded_and_disjoint() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let mut seen = HashSet::new();
    let sizes = [5, 5, 2];

    for (page, expected) in sizes.into_iter().enumerate() {
        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/surveys/paginated?page={page}&size=5"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["number"], page);
        assert_eq!(body["size"], 5);
        assert_eq!(body["totalElements"], 12);
        assert_eq!(body["totalPages"], 3);

        let content = body["content"].as_array().unwrap();
        assert_eq!(content.len(), expected);

        for entry in content {
            assert!(seen.insert(entry["id"].as_str().unwrap().to_string()));
        }
    }

    assert_eq!(seen.len(), 12);
}

#[tokio::test]
async fn descending_sort_is_non_increasing() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/surveys/paginated?page=0&size=12&sortBy=title&sortDirection=desc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles.len(), 12);
    assert!(titles.windows(2).all(|w| w[0] >= w[1]));

    // `sortDirection` values other than desc mean ascending.
    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/paginated?page=0&size=12&sortBy=title&sortDirection=upwards",
        None,
    )
    .await;
    let titles: Vec<&str> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert!(titles.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn invalid_page_params_are_rejected() {
    let app = test_app();
    seed_surveys(&app, 2).await;

    let (status, _) = send(
        &app,
        "GET",
        "/api/surveys/paginated?sortBy=questionsJson",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&app, "GET", "/api/surveys/paginated?sortBy=nope", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&app, "GET", "/api/surveys/paginated?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&app, "GET", "/api/surveys/paginated?size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn substring_filters_are_case_insensitive() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?title=SURVEY%200&size=20",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // "Survey 00" through "Survey 09".
    assert_eq!(body["totalElements"], 10);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?description=description%2011",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?title=no%20such%20survey",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 0);
}

#[tokio::test]
async fn absent_filters_return_everything() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let (_, unfiltered) =
        send(&app, "GET", "/api/surveys/paginated?size=20", None).await;
    let (_, filtered) =
        send(&app, "GET", "/api/surveys/filtered?size=20", None).await;

    assert_eq!(unfiltered["totalElements"], filtered["totalElements"]);
    assert_eq!(
        unfiltered["content"].as_array().unwrap().len(),
        filtered["content"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn exact_match_filters() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?creatorEmail=even@example.com&size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 6);

    // Exact match, not substring: a partial email matches nothing.
    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?creatorEmail=even&size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 0);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?status=DRAFT&size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 3);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/filtered?creatorEmail=even@example.com&status=DRAFT&size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 2);
}

#[tokio::test]
async fn creator_and_status_path_variants() {
    let app = test_app();
    seed_surveys(&app, 12).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/surveys/creator/even@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/creator/even@example.com/paginated?size=4",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 6);
    assert_eq!(body["content"].as_array().unwrap().len(), 4);
    assert_eq!(body["totalPages"], 2);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/status/ACTIVE/paginated?size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 9);

    let (_, body) = send(
        &app,
        "GET",
        "/api/surveys/creator/odd@example.com/status/DRAFT/paginated?size=20",
        None,
    )
    .await;
    assert_eq!(body["totalElements"], 1);
}
