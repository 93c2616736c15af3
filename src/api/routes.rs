/*
 * Responsibility
 * - URL layout of the service
 * - which gate wraps which handler (auth / auth+ownership / auth+admin)
 */
use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::{get, post},
};

use crate::api::handlers::{auth, carts, classes, health, instructors, users};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let authenticated = middleware::from_fn_with_state(state.clone(), access::authenticated);
    let owner_scoped = middleware::from_fn_with_state(state.clone(), access::owner_scoped);
    let admin_only = middleware::from_fn_with_state(state, access::admin_only);

    Router::new()
        .route("/", get(health::liveness))
        .route("/jwt", post(auth::issue_token))
        .route(
            "/users",
            get(users::list_users.layer(admin_only.clone())).post(users::create_user),
        )
        // `{key}` is the email for GET and the user id for PATCH/DELETE
        .route(
            "/users/admin/{key}",
            get(users::is_admin.layer(authenticated.clone()))
                .patch(users::make_admin.layer(admin_only.clone()))
                .delete(users::delete_user.layer(admin_only.clone())),
        )
        .route(
            "/users/instructor/{key}",
            get(users::is_instructor.layer(authenticated))
                .patch(users::make_instructor.layer(admin_only)),
        )
        .route(
            "/classes",
            get(classes::list_classes).post(classes::create_class),
        )
        .route(
            "/myclasses",
            get(classes::my_classes.layer(owner_scoped.clone())),
        )
        .route("/instructors", get(instructors::list_instructors))
        .route(
            "/carts",
            get(carts::list_cart.layer(owner_scoped)).post(carts::add_cart_item),
        )
        .route(
            "/carts/{id}",
            get(carts::get_cart_item).delete(carts::delete_cart_item),
        )
}
