use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

#[get("/test")]
pub async fn test() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Server is running!" }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(test);
}
