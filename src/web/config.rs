//! Web server configuration, read from the typed environment variables

use crate::env::{web, EnvError, EnvResult, EnvVar};

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl WebConfig {
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            max_upload_bytes: web::MaxUploadBytes::get()?,
        })
    }

    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: web::BindAddress::NAME.to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: web::Port::NAME.to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(EnvError {
                variable: web::MaxUploadBytes::NAME.to_string(),
                message: "Upload limit cannot be 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load web config from environment: {}. Using defaults.", e);
            Self {
                bind_addr: "127.0.0.1".to_string(),
                port: 7080,
                max_upload_bytes: 10 * 1024 * 1024,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_address() {
        let config = WebConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_bytes: 4096,
        };

        assert_eq!(config.listen_address(), "0.0.0.0:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = WebConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: 4096,
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.variable, "WORDCLEAN_WEB_PORT");
    }
}
