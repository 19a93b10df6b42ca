use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CartQuery {
    /// Owner whose cart is listed; must match the token's email.
    pub email: Option<String>,
}
