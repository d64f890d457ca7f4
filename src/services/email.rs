//! Onboarding email delivery over SMTP.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::models::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Email delivery service. Construction is cheap; the SMTP connection is
/// established lazily on the first send.
#[derive(Clone)]
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    app_name: String,
    cs_email: String,
    cs_phone: String,
}

impl EmailService {
    pub fn new(config: &SmtpConfig, app_name: String) -> Result<Self, EmailError> {
        let mut builder = match config.encryption.as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?.port(config.port),
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port),
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                .port(config.port),
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.clone(),
            app_name,
            cs_email: config.cs_email.clone(),
            cs_phone: config.cs_phone.clone(),
        })
    }

    /// Send a plain-text email.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(email).await?;

        Ok(())
    }

    /// Welcome mail carrying the generated credentials of a new admin.
    pub async fn send_onboarding(
        &self,
        to: &str,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("Selamat Datang di {}", self.app_name);
        let body = format!(
            "Halo {name},\n\n\
             Akun admin Anda di {app} sudah dibuat.\n\n\
             Username: {username}\n\
             Password: {password}\n\n\
             Silakan login dan segera ganti password Anda.\n\n\
             Butuh bantuan? Hubungi {cs_email} / {cs_phone}.",
            app = self.app_name,
            cs_email = self.cs_email,
            cs_phone = self.cs_phone,
        );

        self.send(to, &subject, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::SmtpConfig;

    fn smtp_config(encryption: &str) -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            username: None,
            password: None,
            encryption: encryption.to_string(),
            from: "noreply@himatika.org".to_string(),
            cs_email: "cs@himatika.org".to_string(),
            cs_phone: "+62000000000".to_string(),
        }
    }

    #[test]
    fn construction_is_lazy_for_all_transport_modes() {
        for mode in ["starttls", "tls", "none"] {
            assert!(EmailService::new(&smtp_config(mode), "Tes".to_string()).is_ok());
        }
    }
}
