use anyhow::{Context, Result};

// Admin service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct AdminPlaneConfig {
    pub admin_email: String,
    pub admin_country: String,
    pub sync_dry_run: bool,
}

impl AdminPlaneConfig {
    pub fn from_env() -> Result<Self> {
        let admin_email =
            std::env::var("QUILL_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let admin_country =
            std::env::var("QUILL_ADMIN_COUNTRY").unwrap_or_else(|_| "SE".to_string());
        let sync_dry_run = std::env::var("QUILL_SYNC_DRY_RUN")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .with_context(|| "parse QUILL_SYNC_DRY_RUN")?;
        Ok(Self {
            admin_email,
            admin_country,
            sync_dry_run,
        })
    }
}
