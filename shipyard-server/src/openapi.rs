//! OpenAPI specification for the Shipyard server.

use utoipa::OpenApi;

use shipyard_core::{Crew, Port, Ship, ShipType};

use crate::dto::{CrewDto, PortDto, ShipDto};
use crate::routes::{DeprecationNotice, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::ship_by_id,
        crate::routes::search_ships,
        crate::routes::create_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
        crate::routes::deprecated,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            Ship,
            Port,
            Crew,
            ShipType,
            ShipDto,
            PortDto,
            CrewDto,
            ErrorResponse,
            DeprecationNotice
        )
    ),
    tags(
        (name = "ships", description = "Ship registry"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Shipyard server.
pub struct ApiDoc;
