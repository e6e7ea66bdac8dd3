//! Background token refresh.

use std::time::Duration;

use http::HeaderValue;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, warn};

use super::token::{ClientCredentials, ClientCredentialsToken};
use crate::client::auth::AuthorizationHeader;
use crate::client::call::{RequestInvoker, check_status};
use crate::client::error::HttpHelperError;

/// Refresh the token this long before the reported expiry.
pub(in crate::client) const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Lower bound of the wait between two refresh attempts.
///
/// Only the first refresh after construction may happen right away.
const MIN_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Owns the bearer header cell and the task that keeps it fresh.
///
/// The header is a single `watch` value: the task replaces it whole, requests
/// clone a snapshot, so a reader sees either the previous or the new token.
#[derive(Debug)]
pub(in crate::client) struct TokenRefresher {
    header: watch::Receiver<HeaderValue>,
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TokenRefresher {
    /// Acquires the first token, then spawns the refresh task.
    ///
    /// The first acquisition has no cancellation path: the helper is not usable without a token.
    pub(in crate::client) async fn start(
        invoker: RequestInvoker,
        credentials: ClientCredentials,
        margin: Duration,
        cancellation: CancellationToken,
    ) -> Result<Self, HttpHelperError> {
        let (header, token) = acquire_bearer(&invoker, &credentials).await?;
        let delay = token.refresh_delay(margin);
        debug!(
            client_id = credentials.client_id(),
            expires_in = token.expires_in(),
            ?delay,
            "initial token acquired"
        );

        let (sender, receiver) = watch::channel(header);
        let task = RefreshTask {
            invoker,
            credentials,
            margin,
            sender,
            cancellation: cancellation.clone(),
        };
        let handle = tokio::spawn(task.run(delay).in_current_span());

        Ok(Self {
            header: receiver,
            cancellation,
            handle: Some(handle),
        })
    }

    pub(in crate::client) fn current_header(&self) -> HeaderValue {
        self.header.borrow().clone()
    }

    /// Stops the task and waits for it to finish. Calling it again is a no-op.
    pub(in crate::client) async fn shutdown(&mut self) {
        self.cancellation.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(error) = handle.await
        {
            warn!(%error, "token refresh task ended abnormally");
        }
    }
}

impl Drop for TokenRefresher {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

struct RefreshTask {
    invoker: RequestInvoker,
    credentials: ClientCredentials,
    margin: Duration,
    sender: watch::Sender<HeaderValue>,
    cancellation: CancellationToken,
}

impl RefreshTask {
    async fn run(self, mut delay: Duration) {
        loop {
            tokio::select! {
                () = self.cancellation.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }

            let result = tokio::select! {
                () = self.cancellation.cancelled() => break,
                result = acquire_bearer(&self.invoker, &self.credentials) => result,
            };

            match result {
                Ok((header, token)) => {
                    self.sender.send_replace(header);
                    delay = token.refresh_delay(self.margin).max(MIN_REFRESH_DELAY);
                    debug!(
                        client_id = self.credentials.client_id(),
                        expires_in = token.expires_in(),
                        ?delay,
                        "token refreshed"
                    );
                }
                Err(error) => {
                    // previous token stays in place until a later attempt succeeds
                    delay = delay.max(MIN_REFRESH_DELAY);
                    warn!(
                        client_id = self.credentials.client_id(),
                        %error,
                        retry_in = ?delay,
                        "token refresh failed"
                    );
                }
            }
        }
        debug!(
            client_id = self.credentials.client_id(),
            "token refresh stopped"
        );
    }
}

/// One full acquisition cycle: token request, status check, decode, header conversion.
///
/// Goes through the same invoker as every other request, without an `Authorization` header.
async fn acquire_bearer(
    invoker: &RequestInvoker,
    credentials: &ClientCredentials,
) -> Result<(HeaderValue, ClientCredentialsToken), HttpHelperError> {
    let request = credentials.to_request()?;
    let throw_on_bad_status = request.throw_on_bad_status();
    let response = invoker.invoke(request, None).await?;
    let response = check_status(response, throw_on_bad_status)?;
    let token = ClientCredentialsToken::from_response(response).await?;
    let header = AuthorizationHeader::bearer(token.access_token()).to_header_value()?;
    Ok((header, token))
}
