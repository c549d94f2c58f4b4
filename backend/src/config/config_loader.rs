use anyhow::{Ok, Result};

use super::config_model::{Database, DotEnvyConfig, GoogleOauth, ImagePrompt, Server, SessionSecret};

const DEFAULT_IMAGE_PROMPT_ENDPOINT: &str = "https://apps.abacus.ai/v1/chat/completions";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let google = GoogleOauth {
        client_id: std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID is invalid"),
        client_secret: std::env::var("GOOGLE_CLIENT_SECRET")
            .expect("GOOGLE_CLIENT_SECRET is invalid"),
    };

    let image_prompt = ImagePrompt {
        endpoint: std::env::var("IMAGE_PROMPT_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_IMAGE_PROMPT_ENDPOINT.to_string()),
        api_key: std::env::var("IMAGE_PROMPT_API_KEY").expect("IMAGE_PROMPT_API_KEY is invalid"),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        google,
        image_prompt,
    })
}

pub fn get_session_secret() -> Result<SessionSecret> {
    dotenvy::dotenv().ok();

    Ok(SessionSecret {
        jwt_secret: std::env::var("SESSION_JWT_SECRET").expect("SESSION_JWT_SECRET is invalid"),
    })
}
