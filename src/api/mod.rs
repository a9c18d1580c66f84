pub mod handlers;
pub mod router;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::hello))
        .route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/calc")
                .route("/{operation}", web::get().to(handlers::calculate))
                .route("/{operation}/{operands:.*}", web::get().to(handlers::calculate)),
        );
}
