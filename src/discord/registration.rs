use thiserror::Error;
use tracing::{info, instrument};

use super::types::{NewCommand, RegisteredCommand};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("request to command endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("command endpoint replied {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Registers and removes the bot's guild slash command
#[derive(Clone)]
pub struct CommandRegistrar {
    client: reqwest::Client,
    api_url: String,
    app_id: String,
    guild_id: String,
    bot_token: String,
}

impl CommandRegistrar {
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        app_id: String,
        guild_id: String,
        bot_token: String,
    ) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            app_id,
            guild_id,
            bot_token,
        }
    }

    fn commands_url(&self) -> String {
        format!(
            "{}/applications/{}/guilds/{}/commands",
            self.api_url, self.app_id, self.guild_id
        )
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    #[instrument(skip(self))]
    pub async fn register(
        &self,
        name: &str,
        description: &str,
    ) -> Result<RegisteredCommand, RegistrationError> {
        let response = self
            .client
            .post(self.commands_url())
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .json(&NewCommand { name, description })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let command: RegisteredCommand = response.json().await?;
        info!(command = %command.name, command_id = %command.id, "Command added");
        Ok(command)
    }

    #[instrument(skip(self, command), fields(command = %command.name, command_id = %command.id))]
    pub async fn delete(&self, command: &RegisteredCommand) -> Result<(), RegistrationError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.commands_url(), command.id))
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Command deleted");
        Ok(())
    }
}
