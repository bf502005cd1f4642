use std::{fmt, net::SocketAddr};

use actix_cors::Cors;
use actix_web::{
    error::InternalError,
    get, middleware,
    web::{scope, Data, JsonConfig, PathConfig, QueryConfig, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use actix_web_opentelemetry::{RequestMetrics, RequestTracing};
use anyhow::{anyhow, Result};
use futures::TryFutureExt;
use tracing::{error, info, instrument, Level};
use wastewise_core::{env::infer_or, error::ApiError, result::Result as Envelope};

use crate::Gateway;

#[instrument(level = Level::INFO)]
#[get("/_health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json("healthy")
}

pub async fn loop_forever(gateway: Gateway) {
    match try_loop_forever(&gateway).await {
        Ok(()) => gateway.signal.terminate(),
        Err(error) => {
            error!("failed to operate http server: {error}");
            gateway.signal.terminate_on_panic()
        }
    }
}

async fn try_loop_forever(gateway: &Gateway) -> Result<()> {
    info!("Starting http server...");

    let addr = infer_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8045)));
    let configure = configure(gateway);

    // Create a http server
    let server = HttpServer::new(move || {
        App::new()
            .configure(configure.clone())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .wrap(Cors::permissive())
            .wrap(RequestTracing::default())
            .wrap(RequestMetrics::default())
    })
    .bind(addr)
    .map_err(|error| anyhow!("failed to bind to {addr}: {error}"))?;

    // Start http server
    info!("Listening on {addr}");
    server.run().map_err(Into::into).await
}

/// Registers the shared components and every REST endpoint of the gateway.
pub fn configure(gateway: &Gateway) -> impl Clone + Fn(&mut ServiceConfig) {
    let clock = Data::new(gateway.clock);
    let db = Data::new(gateway.db.clone());
    let reminders = Data::new(gateway.reminders.clone());
    let route_table = Data::from(gateway.routes.clone());
    let sessions = Data::new(gateway.sessions.clone());

    move |config| {
        config
            .app_data(Data::clone(&clock))
            .app_data(Data::clone(&db))
            .app_data(Data::clone(&reminders))
            .app_data(Data::clone(&route_table))
            .app_data(Data::clone(&sessions))
            .app_data(JsonConfig::default().error_handler(|error, _| reject(error)))
            .app_data(PathConfig::default().error_handler(|error, _| reject(error)))
            .app_data(QueryConfig::default().error_handler(|error, _| reject(error)))
            .service(health)
            .service(
                scope("/api/v1/BinLocation")
                    .service(crate::routes::bin::save)
                    .service(crate::routes::bin::list)
                    .service(crate::routes::bin::get)
                    .service(crate::routes::bin::update)
                    .service(crate::routes::bin::delete)
                    .service(crate::routes::bin::list_nearest)
                    .service(crate::routes::bin::summary),
            )
            .service(
                scope("/api/v1/BinLocations")
                    .service(crate::routes::inventory::save)
                    .service(crate::routes::inventory::list)
                    .service(crate::routes::inventory::update)
                    .service(crate::routes::inventory::delete),
            )
            .service(
                scope("/api/v1/feedback")
                    .service(crate::routes::feedback::save)
                    .service(crate::routes::feedback::list)
                    .service(crate::routes::feedback::update)
                    .service(crate::routes::feedback::delete)
                    .service(crate::routes::feedback::summary),
            )
            .service(
                scope("/api/v1/complains")
                    .service(crate::routes::complaint::save)
                    .service(crate::routes::complaint::list)
                    .service(crate::routes::complaint::update)
                    .service(crate::routes::complaint::delete),
            )
            .service(
                scope("/api/v1/request")
                    .service(crate::routes::request::save)
                    .service(crate::routes::request::list)
                    .service(crate::routes::request::stats)
                    .service(crate::routes::request::get)
                    .service(crate::routes::request::update)
                    .service(crate::routes::request::update_status)
                    .service(crate::routes::request::assign)
                    .service(crate::routes::request::delete),
            )
            .service(
                scope("/api/v1/shedule")
                    .service(crate::routes::schedule::save)
                    .service(crate::routes::schedule::list)
                    .service(crate::routes::schedule::update)
                    .service(crate::routes::schedule::delete)
                    .service(crate::routes::schedule::calendar_day)
                    .service(crate::routes::schedule::calendar_week)
                    .service(crate::routes::schedule::calendar_filters)
                    .service(crate::routes::schedule::calendar_weekdays)
                    .service(crate::routes::schedule::calendar_rotation),
            )
            .service(
                scope("/api/v1/reminder")
                    .service(crate::routes::reminder::toggle)
                    .service(crate::routes::reminder::list)
                    .service(crate::routes::reminder::list_notifications),
            )
            .service(crate::routes::user::create_role)
            .service(crate::routes::user::list_roles)
            .service(crate::routes::user::register)
            .service(crate::routes::user::list)
            .service(crate::routes::user::update)
            .service(crate::routes::user::delete)
            .service(crate::routes::user::authenticate)
            .service(crate::routes::user::for_admin)
            .service(crate::routes::user::for_user);
    }
}

/// Reports a malformed request body, path or query in the usual envelope.
fn reject<E>(error: E) -> ::actix_web::Error
where
    E: 'static + fmt::Debug + fmt::Display,
{
    let response = HttpResponse::from(Envelope::<()>::Err(ApiError::bad_request(&error)));
    InternalError::from_response(error, response).into()
}
