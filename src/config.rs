use std::env;

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Credentials and endpoint for the remote payment processor.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

/// SMTP transport settings for transactional mail.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_address: String,
}

/// Process-wide configuration, read once at startup.
///
/// The checkout workflow itself takes no configuration; everything here is
/// consumed by the collaborator adapters and the HTTP edge.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub cors_allowed_origins: Vec<String>,
    pub gateway: GatewayConfig,
    pub mail: MailConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("FUNDING_BIND", "0.0.0.0:4000"),
            cors_allowed_origins: parse_origin_list(&env_or(
                "FUNDING_CORS_ORIGINS",
                "http://localhost:5173,http://localhost:5174",
            )),
            gateway: GatewayConfig {
                base_url: env_or("FUNDING_GATEWAY_URL", ""),
                api_key: env_or("FUNDING_GATEWAY_API_KEY", ""),
                api_secret: env_or("FUNDING_GATEWAY_API_SECRET", ""),
            },
            mail: MailConfig {
                smtp_host: env_or("FUNDING_SMTP_HOST", "localhost"),
                smtp_user: env_or("FUNDING_SMTP_USER", ""),
                smtp_password: env_or("FUNDING_SMTP_PASS", ""),
                from_address: env_or("FUNDING_MAIL_FROM", "no-reply@fundingtrail.example"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origin_list() {
        let origins = parse_origin_list("http://localhost:5173, http://localhost:5174");
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origin_list_skips_empty_entries() {
        let origins = parse_origin_list("http://a.example,, ,http://b.example");
        assert_eq!(origins, vec!["http://a.example", "http://b.example"]);
    }
}
