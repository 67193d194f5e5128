use axum::extract::{Path, Query};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Json, Router,
};
use contracts::domain::a001_taxonomy::kind::{RecordKind, TaxonomyDomain};
use contracts::domain::a001_taxonomy::node::{ListQuery, NodePayload};
use contracts::domain::a001_taxonomy::reorder::ReorderRequest;

use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    public_routes()
        .merge(user_routes())
        .merge(admin_routes())
}

fn public_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/register", post(system::handlers::auth::register))
}

/// Любой вошедший пользователь
fn user_routes() -> Router {
    Router::new()
        .route("/api/auth/me", get(system::handlers::auth::current_user))
        .route(
            "/api/auth/account",
            get(system::handlers::account::get_account)
                .patch(system::handlers::account::update_account),
        )
        .route(
            "/api/auth/change-password",
            post(system::handlers::account::change_password),
        )
        .route(
            "/api/auth/phone-verification",
            get(system::handlers::account::get_phone_verification)
                .post(system::handlers::account::submit_phone_verification),
        )
        // Мастер анкеты
        .route(
            "/api/profile",
            get(handlers::a003_profile_draft::get_my)
                .post(handlers::a003_profile_draft::create)
                .patch(handlers::a003_profile_draft::save_step),
        )
        // PATCH проверяет флаг администратора внутри обработчика
        .route(
            "/api/lookup",
            get(handlers::lookup::list).patch(handlers::lookup::update_flags),
        )
        .route_layer(middleware::from_fn(require_auth))
}

fn admin_routes() -> Router {
    taxonomy_routes()
        // ========================================
        // Profiles moderation
        // ========================================
        .route("/api/admin/profiles", get(handlers::a002_profile::list))
        .route("/api/admin/profiles/:id", get(handlers::a002_profile::get_by_id))
        .route(
            "/api/admin/profiles/:id/moderate",
            post(handlers::a002_profile::moderate),
        )
        .route(
            "/api/admin/profiles/:id/photos/:photo_id",
            patch(handlers::a002_profile::moderate_photo)
                .delete(handlers::a002_profile::delete_photo),
        )
        .route(
            "/api/admin/profiles/:id/edit",
            get(handlers::a002_profile::get_edit).patch(handlers::a002_profile::update_edit),
        )
        // ========================================
        // Phone verification queue
        // ========================================
        .route(
            "/api/admin/users/verification",
            get(system::handlers::verification::list)
                .post(system::handlers::verification::decide)
                .put(system::handlers::verification::requeue),
        )
        .route_layer(middleware::from_fn(require_admin))
}

/// Справочники: один набор маршрутов на каждый домен и каждый тип записи
fn taxonomy_routes() -> Router {
    let mut router = Router::new();

    for domain in TaxonomyDomain::all().iter().copied() {
        let base = format!("/api/admin/global-settings/{}", domain.slug());
        router = router
            .route(
                &base,
                get(move || handlers::a001_taxonomy::list_domain(domain)),
            )
            .route(
                &format!("{}/reorder", base),
                post(move |Json(request): Json<ReorderRequest>| {
                    handlers::a001_taxonomy::reorder(domain, request)
                }),
            );
    }

    for kind in RecordKind::all().iter().copied() {
        let collection = kind.collection_path();
        router = router
            .route(
                &collection,
                get(move |Query(query): Query<ListQuery>| {
                    handlers::a001_taxonomy::list(kind, query)
                })
                .post(move |Json(payload): Json<NodePayload>| {
                    handlers::a001_taxonomy::create(kind, payload)
                }),
            )
            .route(
                &format!("{}/:id", collection),
                patch(move |Path(id): Path<String>, Json(payload): Json<NodePayload>| {
                    handlers::a001_taxonomy::update(kind, id, payload)
                })
                .delete(move |Path(id): Path<String>| handlers::a001_taxonomy::delete(kind, id)),
            );
    }

    router
        .route(
            "/api/admin/global-settings/languages/by-country",
            get(handlers::a001_taxonomy::list_country_languages)
                .post(handlers::a001_taxonomy::attach_language),
        )
        .route(
            "/api/admin/global-settings/languages/by-country/:country_id/:language_id",
            delete(handlers::a001_taxonomy::detach_language),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_assembles() {
        // все слои middleware и маршруты справочников собираются без конфликтов
        let _router = configure_routes();
    }
}
