//! Ledger entry handlers.
//!
//! ```text
//! GET  /items?type=Income&startDate=2024-01-01&endDate=2024-01-31   (or /items/)
//! GET  /items/create
//! POST /items/create       amount=1500&type=Expense&event=Lunch&memo=
//! GET  /items/edit/{id}
//! POST /items/edit/{id}
//! POST /items/delete/{id}
//! GET  /items/detail/{id}
//! ```
//!
//! The whole scope sits behind [`RequireSession`]; handlers still resolve the
//! user explicitly and pass it to every ledger call.

use actix_web::{HttpResponse, get, post, routes, web};
use serde::Serialize;
use serde_json::json;

use crate::domain::{Error, FilterInput, Item, ItemFilter, ItemId, ItemInput, Locale, Message};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{FormView, ITEMS_PATH, invalid_form, see_other};
use crate::middleware::RequireSession;

/// Edit view: the stored entry plus its values as a prefilled form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditItemView {
    pub item: Item,
    #[serde(flatten)]
    pub view: FormView<ItemInput>,
}

fn item_not_found(locale: Locale) -> Error {
    let message = Message::ItemNotFound;
    Error::not_found(message.text(locale)).with_details(json!({ "code": message.code() }))
}

/// Non-numeric path segments name no entry, so they are reported as missing.
fn parse_item_id(locale: Locale, raw: &str) -> Result<ItemId, Error> {
    ItemId::from_path(raw).ok_or_else(|| item_not_found(locale))
}

/// The signed-in user's entries, totals, and echoed filter values.
#[routes]
#[get("")]
#[get("/")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FilterInput>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let filter = ItemFilter::parse(&query)
        .map_err(|err| invalid_form::<()>(state.locale, err.message(), None))?;
    let listing = state.ledger_query.list_items(&owner, &filter).await?;
    Ok(HttpResponse::Ok().json(listing))
}

#[get("/create")]
pub async fn create_page(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    Ok(HttpResponse::Ok().json(FormView::blank(ItemInput::default())))
}

#[post("/create")]
pub async fn create_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ItemInput>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    state.ledger_command.create_item(&owner, &form).await?;
    Ok(see_other(ITEMS_PATH))
}

#[get("/edit/{id}")]
pub async fn edit_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_item_id(state.locale, &path)?;
    let item = state.ledger_query.get_item(&owner, id).await?;
    let view = FormView::blank(item.to_input());
    Ok(HttpResponse::Ok().json(EditItemView { item, view }))
}

#[post("/edit/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<ItemInput>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_item_id(state.locale, &path)?;
    state.ledger_command.update_item(&owner, id, &form).await?;
    Ok(see_other(ITEMS_PATH))
}

#[post("/delete/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_item_id(state.locale, &path)?;
    state.ledger_command.delete_item(&owner, id).await?;
    Ok(see_other(ITEMS_PATH))
}

#[get("/detail/{id}")]
pub async fn item_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let id = parse_item_id(state.locale, &path)?;
    let item = state.ledger_query.get_item(&owner, id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Register the guarded `/items` scope.
pub fn configure_items(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(ITEMS_PATH)
            .wrap(RequireSession)
            .service(list_items)
            .service(create_page)
            .service(create_item)
            .service(edit_page)
            .service(update_item)
            .service(delete_item)
            .service(item_detail),
    );
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
