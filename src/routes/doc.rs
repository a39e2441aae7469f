use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        checkout::{CartItem, CheckoutSessionCreated, CreateCheckoutRequest},
        reviews::{AddReviewRequest, ReviewText, SuccessResponse},
    },
    error::ErrorBody,
    models::{Order, Review},
    routes::{checkout, health, orders, reviews, webhook},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Shared admin secret (ADMIN_PASSWORD)"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        checkout::create_checkout_session,
        webhook::stripe_webhook,
        orders::list_orders,
        orders::get_order,
        reviews::add_review,
        reviews::list_reviews
    ),
    components(
        schemas(
            Order,
            Review,
            CartItem,
            CreateCheckoutRequest,
            CheckoutSessionCreated,
            AddReviewRequest,
            ReviewText,
            SuccessResponse,
            ErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Checkout", description = "Hosted checkout sessions"),
        (name = "Webhook", description = "Signed payment provider callbacks"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Reviews", description = "Customer reviews"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
