#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub google: GoogleOauth,
    pub image_prompt: ImagePrompt,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct GoogleOauth {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct ImagePrompt {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct SessionSecret {
    pub jwt_secret: String,
}
