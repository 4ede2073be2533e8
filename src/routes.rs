use axum::http::HeaderValue;
use axum::{middleware::from_fn, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config;
use crate::middleware::{require_admin, require_authentication};

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .merge(public_routes())
        // Token-gated (callers act on their own account)
        .merge(authed_routes())
        // Admin-gated (token check first, then the role lookup)
        .merge(admin_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use axum::routing::{patch, post};
    use crate::handlers::{coupons, products, reviews, token, users};

    Router::new()
        // Token acquisition
        .route("/jwt", post(token::issue_token))
        // Product listings. /add-product and /update-product started out as
        // page-specific copies of the catalog on the frontend and stay
        // routable for old clients.
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route("/products/email/:email", get(products::products_by_owner))
        .route(
            "/add-product",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/add-product/:id",
            get(products::get_product).delete(products::delete_product),
        )
        .route("/update-product", get(products::list_products))
        .route(
            "/update-product/:id",
            get(products::get_product).put(products::update_product),
        )
        // Curated feeds and moderation views
        .route("/featured", get(products::featured_products))
        .route("/trending", get(products::trending_products))
        .route("/all-products", get(products::browse_products))
        .route("/all-products-count", get(products::browse_products_count))
        .route("/products-review-queue", get(products::review_queue))
        .route("/reported-products", get(products::reported_products))
        // Product state changes
        .route("/products/upvote/:id", patch(products::upvote_product))
        .route("/products/report/:id", patch(products::report_product))
        .route("/products/featured/:id", patch(products::feature_product))
        .route("/products/accepted/:id", patch(products::accept_product))
        .route("/products/rejected/:id", patch(products::reject_product))
        // Reviews
        .route("/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/reviews/:id", get(reviews::product_reviews))
        // Users and coupons
        .route("/users/:email", get(users::get_user))
        .route("/users", post(users::create_user))
        .route("/coupons", get(coupons::list_coupons))
        .route("/coupons/:id", get(coupons::get_coupon))
}

fn authed_routes() -> Router {
    use axum::routing::{patch, post};
    use crate::handlers::{payments, users};

    Router::new()
        .route("/users/admin/:email", get(users::admin_status))
        .route("/users/payment/:email", patch(users::verify_membership))
        .route("/create-payment-intent", post(payments::create_payment_intent))
        .route_layer(from_fn(require_authentication))
}

fn admin_routes() -> Router {
    use axum::routing::{patch, post, put};
    use crate::handlers::{coupons, users};

    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:email", patch(users::update_role))
        .route("/coupons", post(coupons::create_coupon))
        .route(
            "/coupons/:id",
            put(coupons::update_coupon).delete(coupons::delete_coupon),
        )
        // Innermost layer runs last, so the token check precedes the role check
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn(require_authentication))
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().server.cors_allowed_origins;

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparseable CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> &'static str {
    "TechHive server is running"
}
