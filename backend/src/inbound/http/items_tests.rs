//! Tests for the ledger entry handlers.

use super::*;
use crate::domain::ports::ItemListing;
use crate::domain::{
    Amount, ItemFields, ItemType, LedgerSummary, UserId,
};
use crate::inbound::http::test_utils::{
    MockPorts, location, session_cookie, test_session_middleware,
};
use crate::middleware::LOGIN_PATH;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::{TimeZone, Utc};
use serde_json::Value;

const OWNER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn owner() -> UserId {
    UserId::new(OWNER).expect("fixture id")
}

fn salary() -> Item {
    Item::new(
        ItemId::new(7),
        owner(),
        ItemFields {
            amount: Amount::new(2000).expect("positive"),
            kind: ItemType::Income,
            event: "Salary".to_owned(),
            memo: None,
        },
        Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single().expect("valid time"),
    )
}

fn items_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(ports.into_state())
        .wrap(test_session_middleware())
        .route(
            "/test/sign-in",
            web::get().to(|session: SessionContext| async move {
                session.sign_in(&owner())?;
                Ok::<_, Error>(HttpResponse::Ok().finish())
            }),
        )
        .configure(configure_items)
}

async fn sign_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri("/test/sign-in").to_request(),
    )
    .await;
    session_cookie(&res).expect("session cookie")
}

fn item_form(amount: &str, kind: &str, event: &str) -> [(&'static str, String); 4] {
    [
        ("amount", amount.to_owned()),
        ("type", kind.to_owned()),
        ("event", event.to_owned()),
        ("memo", String::new()),
    ]
}

#[actix_web::test]
async fn anonymous_listing_redirects_to_login() {
    let mut ports = MockPorts::default();
    ports.ledger_query.expect_list_items().never();
    let app = test::init_service(items_app(ports)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/items").to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(LOGIN_PATH));
}

#[actix_web::test]
async fn anonymous_mutations_never_reach_the_ledger() {
    let mut ports = MockPorts::default();
    ports.ledger_command.expect_create_item().never();
    ports.ledger_command.expect_delete_item().never();
    let app = test::init_service(items_app(ports)).await;

    for request in [
        test::TestRequest::post()
            .uri("/items/create")
            .set_form(item_form("100", "Income", "Gift"))
            .to_request(),
        test::TestRequest::post().uri("/items/delete/1").to_request(),
    ] {
        let res = test::call_service(&app, request).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res).as_deref(), Some(LOGIN_PATH));
    }
}

#[actix_web::test]
async fn listing_passes_owner_and_parsed_filter() {
    let mut ports = MockPorts::default();
    ports
        .ledger_query
        .expect_list_items()
        .withf(|user, filter| {
            user.to_string() == OWNER
                && filter.kind == Some(ItemType::Income)
                && filter.start_date.map(|d| d.to_string()) == Some("2024-01-02".to_owned())
                && filter.end_date.is_none()
        })
        .return_once(|_, filter| {
            let items = vec![salary()];
            Ok(ItemListing {
                summary: LedgerSummary::from_items(&items),
                filter: filter.echo(),
                items,
            })
        });
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/items?type=Income&startDate=2024-01-02&endDate=")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["items"][0]["event"], "Salary");
    assert_eq!(body["totalIncome"], 2000);
    assert_eq!(body["totalExpense"], 0);
    assert_eq!(body["balance"], 2000);
    assert_eq!(body["typeFilter"], "Income");
    assert_eq!(body["startDate"], "2024-01-02");
}

#[actix_web::test]
async fn malformed_filter_is_rejected() {
    let mut ports = MockPorts::default();
    ports.ledger_query.expect_list_items().never();
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/items?startDate=02/01/2024")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_date_filter");
}

#[actix_web::test]
async fn create_page_renders_blank_form() {
    let app = test::init_service(items_app(MockPorts::default())).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/items/create")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["form"]["amount"], "");
    assert_eq!(body["form"]["type"], "");
    assert!(body["error"].is_null());
}

#[actix_web::test]
async fn create_redirects_to_listing() {
    let mut ports = MockPorts::default();
    ports
        .ledger_command
        .expect_create_item()
        .withf(|user, input| {
            user.to_string() == OWNER
                && input.amount == "1500"
                && input.kind == "Expense"
                && input.event == "Lunch"
        })
        .times(1)
        .return_once(|_, _| Ok(ItemId::new(1)));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/items/create")
            .cookie(cookie)
            .set_form(item_form("1500", "Expense", "Lunch"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(ITEMS_PATH));
}

#[actix_web::test]
async fn rejected_create_returns_validation_payload() {
    let mut ports = MockPorts::default();
    ports.ledger_command.expect_create_item().return_once(|_, input| {
        Err(Error::invalid_request("Amount must be a positive whole number")
            .with_details(json!({ "code": "invalid_amount", "input": input })))
    });
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/items/create")
            .cookie(cookie)
            .set_form(item_form("-5", "Expense", "Lunch"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["input"]["amount"], "-5");
}

#[actix_web::test]
async fn edit_page_prefills_the_form() {
    let mut ports = MockPorts::default();
    ports
        .ledger_query
        .expect_get_item()
        .withf(|user, id| user.to_string() == OWNER && *id == ItemId::new(7))
        .return_once(|_, _| Ok(salary()));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/items/edit/7")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["item"]["id"], 7);
    assert_eq!(body["form"]["amount"], "2000");
    assert_eq!(body["form"]["type"], "Income");
    assert!(body["error"].is_null());
}

#[actix_web::test]
async fn non_numeric_ids_are_not_found() {
    let mut ports = MockPorts::default();
    ports.ledger_query.expect_get_item().never();
    ports.ledger_command.expect_delete_item().never();
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    for request in [
        test::TestRequest::get().uri("/items/detail/abc"),
        test::TestRequest::get().uri("/items/edit/abc"),
        test::TestRequest::post().uri("/items/delete/abc"),
    ] {
        let res = test::call_service(&app, request.cookie(cookie.clone()).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Item not found");
    }
}

#[actix_web::test]
async fn update_redirects_to_listing() {
    let mut ports = MockPorts::default();
    ports
        .ledger_command
        .expect_update_item()
        .withf(|user, id, input| {
            user.to_string() == OWNER && *id == ItemId::new(7) && input.amount == "2500"
        })
        .times(1)
        .return_once(|_, _, _| Ok(salary()));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/items/edit/7")
            .cookie(cookie)
            .set_form(item_form("2500", "Income", "Salary"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(ITEMS_PATH));
}

#[actix_web::test]
async fn deleting_a_missing_item_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .ledger_command
        .expect_delete_item()
        .return_once(|_, _| Err(Error::not_found("Item not found")));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/items/delete/99")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_redirects_to_listing() {
    let mut ports = MockPorts::default();
    ports
        .ledger_command
        .expect_delete_item()
        .withf(|user, id| user.to_string() == OWNER && *id == ItemId::new(7))
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/items/delete/7")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(ITEMS_PATH));
}

#[actix_web::test]
async fn detail_returns_the_item() {
    let mut ports = MockPorts::default();
    ports
        .ledger_query
        .expect_get_item()
        .return_once(|_, _| Ok(salary()));
    let app = test::init_service(items_app(ports)).await;
    let cookie = sign_in(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/items/detail/7")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["amount"], 2000);
    assert_eq!(body["type"], "Income");
    assert!(body.get("owner").is_none());
}
