use actix_web::{http::header::ContentType, web, HttpResponse};
use manti_evi::{
    menu::MENU_ITEMS,
    page::{self, PageState},
};
use tokio::sync::watch;

pub(super) struct ApiState {
    page: watch::Receiver<PageState>,
}

impl ApiState {
    pub(super) fn new(page: watch::Receiver<PageState>) -> Self {
        Self { page }
    }

    fn snapshot(&self) -> PageState {
        self.page.borrow().clone()
    }
}

#[derive(serde::Serialize)]
struct StatusJsonResp {
    status: &'static str,
}

#[actix_web::get("/")]
pub(super) async fn index(state: web::Data<ApiState>) -> HttpResponse {
    let body = match state.snapshot().data() {
        None => page::render_loading(),
        Some(data) => page::render_page(data, &MENU_ITEMS),
    };
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[actix_web::get("/api/v1/restaurant")]
pub(super) async fn restaurant(state: web::Data<ApiState>) -> HttpResponse {
    match state.snapshot().data() {
        None => HttpResponse::ServiceUnavailable().json(StatusJsonResp { status: "loading" }),
        Some(data) => HttpResponse::Ok().json(data.as_ref()),
    }
}

#[actix_web::get("/api/v1/menu")]
pub(super) async fn menu() -> HttpResponse {
    HttpResponse::Ok().json(&*MENU_ITEMS)
}
