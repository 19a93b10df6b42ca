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
        auth::TokenResponse,
        payments::{PaymentIntentRequest, PaymentIntentResponse, PaymentRecordResponse},
    },
    models::{AdminFlag, InstructorFlag, Role},
    response::ErrorBody,
    routes::{auth, cart, classes, content, health, history, payments, users},
    store::{DeleteResult, InsertOneResult, UpdateResult},
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
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        health::health_check,
        auth::issue,
        users::list_users,
        users::register_user,
        users::delete_user,
        users::check_admin,
        users::check_instructor,
        users::make_admin,
        users::make_instructor,
        classes::list_classes,
        classes::create_class,
        classes::classes_by_email,
        classes::approve_class,
        classes::delete_class,
        classes::decrement_seat,
        content::list_blogs,
        content::create_blog,
        content::list_instructors,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        payments::create_payment_intent,
        payments::record_payment,
        history::list_history,
        history::lookup_history,
        history::issue_certificate
    ),
    components(
        schemas(
            TokenResponse,
            PaymentIntentRequest,
            PaymentIntentResponse,
            PaymentRecordResponse,
            InsertOneResult,
            UpdateResult,
            DeleteResult,
            AdminFlag,
            InstructorFlag,
            Role,
            ErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and health endpoints"),
        (name = "Auth", description = "Bearer token issuance"),
        (name = "Users", description = "User accounts and roles"),
        (name = "Classes", description = "Class listings and seats"),
        (name = "Content", description = "Blog posts and instructor profiles"),
        (name = "Cart", description = "Class enrollment cart"),
        (name = "Payments", description = "Card payments"),
        (name = "History", description = "Payment history and certificates"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
