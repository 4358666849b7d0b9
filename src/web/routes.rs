//! HTML page and JSON handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::html;
use super::session::Session;
use super::state::AppState;
use crate::pages::{
    Entity, PageError, SearchTable, load_detail, load_listing, load_order, load_search, parse_page,
};
use crate::stats::StatsAggregate;
use crate::types::RowValues;

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    table: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

fn list_path(entity: Entity) -> String {
    format!("/{}s", entity.name())
}

fn detail_prefix(entity: Entity) -> String {
    format!("/{}/", entity.name())
}

fn page(session: Session, title: &str, body: &str) -> Response {
    (session, Html(html::layout(title, body))).into_response()
}

fn fail(state: &AppState, session: Session, err: &PageError) -> Response {
    (session, state.failure(err)).into_response()
}

async fn home(session: Session) -> Response {
    let body = "<p>This is a demo of the Northwind dataset running on SQLite. \
        Every page shows the SQL it ran on the <a href=\"/dash\">dashboard</a>.</p>\n\
        <ul>\n\
        <li><a href=\"/products\">Products</a></li>\n\
        <li><a href=\"/suppliers\">Suppliers</a></li>\n\
        <li><a href=\"/orders\">Orders</a></li>\n\
        <li><a href=\"/employees\">Employees</a></li>\n\
        <li><a href=\"/customers\">Customers</a></li>\n\
        <li><a href=\"/search\">Search</a></li>\n\
        </ul>";
    page(session, "Welcome to Northwind Traders", body)
}

async fn dash(State(state): State<Arc<AppState>>, session: Session) -> Response {
    let snapshot = state.stats.snapshot(session.id);
    page(session, "Dashboard", &html::dashboard(&snapshot, &state.served_by))
}

async fn listing(state: &AppState, session: Session, entity: Entity, query: PageQuery) -> Response {
    let page_number = parse_page(query.page.as_deref());
    let loaded = match load_listing(&*state.executor, entity, page_number, state.items_per_page).await {
        Ok(loaded) => loaded,
        Err(err) => return fail(state, session, &err),
    };
    state.stats.apply(session.id, loaded.stats);

    let list = loaded.data;
    let body = format!(
        "<p>{} total</p>\n{}\n{}",
        list.total,
        html::table(&list.rows, Some(&detail_prefix(entity))),
        html::paginate(&list_path(entity), list.page, list.pages)
    );
    page(session, entity.title(), &body)
}

async fn detail(state: &AppState, session: Session, entity: Entity, raw_id: String) -> Response {
    let id = if entity.has_text_id() {
        RowValues::Text(raw_id)
    } else {
        match raw_id.trim().parse::<i64>() {
            Ok(id) => RowValues::Int(id),
            Err(_) => return fail(state, session, &PageError::NotFound(entity.name())),
        }
    };

    let loaded = match load_detail(&*state.executor, entity, id).await {
        Ok(loaded) => loaded,
        Err(err) => return fail(state, session, &err),
    };
    state.stats.apply(session.id, loaded.stats);

    match loaded.data {
        Some(row) => {
            let title = format!("{} {}", entity.name(), row.text("Id"));
            page(session, &title, &html::detail_card(&row, None))
        }
        None => fail(state, session, &PageError::NotFound(entity.name())),
    }
}

async fn products(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    listing(&state, session, Entity::Product, query).await
}

async fn customers(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    listing(&state, session, Entity::Customer, query).await
}

async fn suppliers(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    listing(&state, session, Entity::Supplier, query).await
}

async fn employees(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    listing(&state, session, Entity::Employee, query).await
}

async fn orders(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    listing(&state, session, Entity::Order, query).await
}

async fn product(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    detail(&state, session, Entity::Product, id).await
}

async fn customer(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    detail(&state, session, Entity::Customer, id).await
}

async fn supplier(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    detail(&state, session, Entity::Supplier, id).await
}

async fn employee(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    detail(&state, session, Entity::Employee, id).await
}

async fn order(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.trim().parse::<i64>() else {
        return fail(&state, session, &PageError::NotFound(Entity::Order.name()));
    };
    let loaded = match load_order(&*state.executor, id).await {
        Ok(loaded) => loaded,
        Err(err) => return fail(&state, session, &err),
    };
    state.stats.apply(session.id, loaded.stats);

    let order = loaded.data;
    let Some(header) = order.header else {
        return fail(&state, session, &PageError::NotFound(Entity::Order.name()));
    };
    let body = format!(
        "{}\n<h2>Products in order</h2>\n{}",
        html::detail_card(&header, None),
        html::table(&order.lines, Some(&detail_prefix(Entity::Product)))
    );
    page(session, &format!("order {id}"), &body)
}

fn search_form(keyword: &str, table: SearchTable) -> String {
    let option = |value: SearchTable, label: &str| {
        let selected = if value == table { " selected" } else { "" };
        format!("<option value=\"{value}\"{selected}>{label}</option>")
    };
    format!(
        "<form action=\"/search\" method=\"get\">\n<input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Enter keyword...\">\n<select name=\"table\">{}{}</select>\n<button type=\"submit\">Search</button>\n</form>",
        html::escape(keyword),
        option(SearchTable::Products, "Products"),
        option(SearchTable::Customers, "Customers"),
    )
}

async fn search(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Response {
    let table = SearchTable::parse(query.table.as_deref());
    let keyword = query.q.as_deref().map(str::trim).unwrap_or_default();
    let form = search_form(keyword, table);
    if keyword.is_empty() {
        return page(session, "Search", &form);
    }

    let loaded = match load_search(&*state.executor, keyword, table, state.items_per_page).await {
        Ok(loaded) => loaded,
        Err(err) => return fail(&state, session, &err),
    };
    state.stats.apply(session.id, loaded.stats);

    let prefix = match table {
        SearchTable::Products => detail_prefix(Entity::Product),
        SearchTable::Customers => detail_prefix(Entity::Customer),
    };
    let body = format!(
        "{form}\n<h2>Search results</h2>\n{}",
        html::table(&loaded.data, Some(&prefix))
    );
    page(session, "Search", &body)
}

async fn api_stats(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> (Session, Json<StatsAggregate>) {
    let snapshot = state.stats.snapshot(session.id);
    (session, Json(snapshot))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Every route of the application.
///
/// - GET / - Home
/// - GET /dash - Session dashboard
/// - GET /{products,customers,suppliers,employees,orders}?page= - Listings
/// - GET /{product,customer,supplier,employee,order}/{id} - Detail pages
/// - GET /search?q=&table= - Keyword search
/// - GET /api/stats - Session stats as JSON
/// - GET /health - Health check
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/dash", get(dash))
        .route("/products", get(products))
        .route("/product/{id}", get(product))
        .route("/customers", get(customers))
        .route("/customer/{id}", get(customer))
        .route("/suppliers", get(suppliers))
        .route("/supplier/{id}", get(supplier))
        .route("/employees", get(employees))
        .route("/employee/{id}", get(employee))
        .route("/orders", get(orders))
        .route("/order/{id}", get(order))
        .route("/search", get(search))
        .route("/api/stats", get(api_stats))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_form_keeps_keyword_and_table() {
        let form = search_form("\"chai\"", SearchTable::Products);
        assert!(form.contains("value=\"&quot;chai&quot;\""));
        assert!(form.contains("<option value=\"products\" selected>"));
        assert!(form.contains("<option value=\"customers\">"));
    }

    #[test]
    fn health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
