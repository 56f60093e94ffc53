use crate::{
    api::{access, attendance, employee, report, shift},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            // authentication
            .wrap(protected_limiter) // rate limiting
            .service(handlers::protected)
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    .service(
                        web::resource("/departments")
                            .route(web::get().to(employee::list_departments)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{id}/access
                    .service(
                        web::resource("/{id}/access")
                            .route(web::put().to(access::update_access_rights)),
                    ),
            )
            .service(
                web::scope("/shifts")
                    .service(web::resource("").route(web::get().to(shift::list_shifts)))
                    // /shifts/assign
                    .service(web::resource("/assign").route(web::post().to(shift::assign)))
                    .service(web::resource("/{id}").route(web::put().to(shift::update_shift))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/records").route(web::get().to(attendance::list_records)),
                    )
                    .service(
                        web::resource("/events")
                            .route(web::get().to(attendance::list_events))
                            .route(web::post().to(attendance::record_event)),
                    )
                    .service(
                        web::resource("/summary").route(web::get().to(attendance::daily_summary)),
                    ),
            )
            .service(
                web::scope("/access")
                    .service(web::resource("/areas").route(web::get().to(access::list_areas)))
                    .service(
                        web::resource("/areas/{area_id}/doors/{door_id}")
                            .route(web::put().to(access::set_door_status)),
                    )
                    .service(
                        web::resource("/areas/{area_id}/doors/{door_id}/config")
                            .route(web::put().to(access::update_door_config)),
                    )
                    .service(web::resource("/summary").route(web::get().to(access::door_summary))),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/generate").route(web::post().to(report::generate))),
            ),
    );
}
