use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::email::{dtos as email_dtos, handlers as email_handlers};
use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::home::handlers as home_handlers;
use crate::shared::types::{ErrorResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Home
        home_handlers::index,
        home_handlers::hello,
        // Files
        files_handlers::process_file,
        files_handlers::download_file,
        // Auth
        auth_handlers::signup,
        auth_handlers::login,
        auth_handlers::logout,
        // Email
        email_handlers::send_email,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            MessageResponse,
            // Files
            files_dtos::ProcessFileDto,
            files_dtos::ProcessFileResponseDto,
            // Auth
            auth_dtos::SignupRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::AuthUserDto,
            // Email
            email_dtos::SendEmailRequestDto,
        )
    ),
    tags(
        (name = "home", description = "Welcome and greeting endpoints"),
        (name = "files", description = "File upload and download"),
        (name = "auth", description = "Signup, login and logout"),
        (name = "email", description = "Outbound email"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "MediaDrop API",
        version = "0.1.0",
        description = "API documentation for MediaDrop",
    )
)]
pub struct ApiDoc;

/// Adds the opaque session token scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
