mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use engine::{Category, ExpenseDraft, ExpenseId};
use expense_tracker::{ClientError, Session};

use common::{TOKEN, view};

fn draft(amount: f64) -> ExpenseDraft {
    ExpenseDraft {
        amount,
        category: Some(Category::Essential),
        description: "electricity".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 5),
    }
}

#[tokio::test]
async fn list_normalizes_timestamped_dates() {
    let (server, addr) = common::spawn().await;
    server.seed(vec![
        view("a", 10.0, "Basic", "bread", "2024-01-05"),
        view("b", 20.0, "Essential", "gas", "2024-01-05T18:00:00"),
        view("c", 5.5, "Non-Essential", "sweets", "2024-01-06T00:00:00.000Z"),
    ]);

    let client = common::client(addr, common::logged_in_session());
    let expenses = client.list().await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[0].date, day);
    assert_eq!(expenses[1].date, day);
    assert_eq!(expenses[2].category, Category::NonEssential);
    assert_eq!(expenses[2].amount.value(), 5.5);
}

#[tokio::test]
async fn missing_token_fails_without_request() {
    let (server, addr) = common::spawn().await;
    let client = common::client(addr, Session::in_memory());

    assert!(matches!(client.list().await, Err(ClientError::Unauthenticated)));
    assert!(matches!(
        client.delete(&ExpenseId::new("a")).await,
        Err(ClientError::Unauthenticated)
    ));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn unauthorized_response_clears_session() {
    let (server, addr) = common::spawn().await;
    let session = Session::in_memory();
    session.set_token("stale-token");
    let client = common::client(addr, session.clone());

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
    assert!(session.token().is_none());
    assert!(!client.session().is_authenticated());
    assert_eq!(server.hits(), 1);

    // No token left, so the next call never leaves the process.
    assert!(matches!(client.list().await, Err(ClientError::Unauthenticated)));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn negative_amount_is_rejected_locally() {
    let (server, addr) = common::spawn().await;
    let client = common::client(addr, common::logged_in_session());

    let err = client.create(&draft(-5.0)).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));

    let missing_category = ExpenseDraft {
        category: None,
        ..draft(5.0)
    };
    let err = client
        .update(&ExpenseId::new("a"), &missing_category)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));

    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn create_returns_canonical_record() {
    let (server, addr) = common::spawn().await;
    let client = common::client(addr, common::logged_in_session());

    let created = client.create(&draft(42.0)).await.unwrap();
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.amount.value(), 42.0);
    assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

    let stored = server.expenses();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, created.id.as_str());
    assert_eq!(stored[0].category, "Essential");
}

#[tokio::test]
async fn update_and_delete_of_missing_id_are_not_found() {
    let (_server, addr) = common::spawn().await;
    let client = common::client(addr, common::logged_in_session());
    let missing = ExpenseId::new("missing");

    assert!(matches!(
        client.update(&missing, &draft(1.0)).await,
        Err(ClientError::NotFound)
    ));
    assert!(matches!(
        client.delete(&missing).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn other_statuses_are_server_errors_with_body() {
    let (server, addr) = common::spawn().await;
    server.fail_with(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#);
    let session = common::logged_in_session();
    let client = common::client(addr, session.clone());

    match client.list().await {
        Err(ClientError::ServerError { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, r#"{"error":"boom"}"#);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(session.token().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn unknown_category_from_server_is_a_server_error() {
    let (server, addr) = common::spawn().await;
    server.seed(vec![view("a", 1.0, "Luxury", "yacht", "2024-01-05")]);
    let client = common::client(addr, common::logged_in_session());

    assert!(matches!(
        client.list().await,
        Err(ClientError::ServerError { .. })
    ));
}

#[tokio::test]
async fn unreachable_server_is_unavailable() {
    let addr = common::dead_addr().await;
    let client = common::client(addr, common::logged_in_session());

    assert!(matches!(
        client.list().await,
        Err(ClientError::Unavailable(_))
    ));
}

#[tokio::test]
async fn not_found_on_the_collection_is_a_server_error() {
    let (server, addr) = common::spawn().await;
    server.fail_with(StatusCode::NOT_FOUND, "Cannot GET /api/expenses");
    let client = common::client(addr, common::logged_in_session());

    for result in [
        client.list().await.map(|_| ()),
        client.create(&draft(3.0)).await.map(|_| ()),
    ] {
        match result {
            Err(ClientError::ServerError { status, body }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "Cannot GET /api/expenses");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
