use utoipa::OpenApi;
use crate::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(title = "lamp-api", description = "Lamp records mirrored onto MQTT"),
    paths(
        handlers::list_lamps,
        handlers::get_lamp,
        handlers::create_lamp,
        handlers::update_lamp,
        handlers::delete_lamp,
    ),
    components(
        schemas(models::Lamp, models::ErrorBody)
    )
)]
pub struct ApiDoc;
