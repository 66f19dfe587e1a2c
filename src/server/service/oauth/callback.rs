use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};
use serenity::all::User as DiscordUser;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::oauth::DiscordAuthService,
};

const DISCORD_CURRENT_USER_URL: &str = "https://discord.com/api/users/@me";

impl<'a> DiscordAuthService<'a> {
    /// Exchanges an authorization code and fetches the Discord user it belongs to.
    ///
    /// # Arguments
    /// - `authorization_code` - Code returned by Discord to the callback URL
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - The user who completed the login
    /// - `Err(AppError::AuthErr)` - The code could not be exchanged
    /// - `Err(AppError::ReqwestErr)` - The user lookup failed
    pub async fn callback(&self, authorization_code: String) -> Result<DiscordUser, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        self.fetch_discord_user(&token).await
    }

    /// Retrieves a Discord user's information using provided access token
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let access_token = token.access_token().secret();

        let user_info = self
            .http_client
            .get(DISCORD_CURRENT_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user_info)
    }
}
