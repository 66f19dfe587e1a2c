//! Durable notification queue shared by the bot and the dashboard.
//!
//! Producers append envelopes to a log collection; each process drains the log on an
//! interval and runs the handlers it registered for the envelope types it consumes. An
//! envelope is stamped processed only after its handler succeeded, so a failed or
//! interrupted drain retries it on the next pass.
//!
//! Handlers run without the collection lock held. Stamping re-loads the log and matches
//! envelopes by id, so entries appended while handlers were running are preserved.

use chrono::{DateTime, Duration, Utc};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::{collections::HashMap, future::Future, sync::Arc};
use tokio::sync::RwLock;

use crate::server::{
    data::store::{Collection, JsonStore},
    error::{store::StoreError, AppError},
    model::notification::Envelope,
};

/// Processed envelopes are kept this long before compaction.
const PROCESSED_RETENTION: Duration = Duration::hours(24);
/// Envelopes nobody consumed are dropped after this long.
const UNPROCESSED_RETENTION: Duration = Duration::days(7);

/// Async callback consuming one envelope.
pub type EnvelopeHandler =
    Arc<dyn Fn(Envelope) -> BoxFuture<'static, Result<(), AppError>> + Send + Sync>;

/// Wraps an async closure into an [`EnvelopeHandler`].
pub fn handler<F, Fut>(f: F) -> EnvelopeHandler
where
    F: Fn(Envelope) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), AppError>> + Send + 'static,
{
    Arc::new(move |envelope| f(envelope).boxed())
}

#[derive(Clone)]
pub struct NotificationQueue {
    store: JsonStore,
    handlers: Arc<RwLock<HashMap<String, EnvelopeHandler>>>,
}

impl NotificationQueue {
    /// Creates a queue over the store's notification log with no handlers registered.
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Appends an envelope to the log.
    ///
    /// Failures are logged and reported as `false`; callers must not depend on delivery.
    ///
    /// # Arguments
    /// - `kind` - Envelope type (see `model::notification::kind`)
    /// - `payload` - Serializable payload
    ///
    /// # Returns
    /// - `true` - The envelope was written
    /// - `false` - The payload could not be serialized or the log could not be written
    pub async fn enqueue<T: Serialize>(&self, kind: &str, payload: &T) -> bool {
        let payload = match serde_json::to_value(payload) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize {} notification payload: {}", kind, e);
                return false;
            }
        };

        let envelope = Envelope::new(kind, payload, Utc::now());
        let id = envelope.id.clone();

        let result = self
            .store
            .update(Collection::Notifications, |log: &mut Vec<Envelope>| {
                log.push(envelope);
                Ok::<_, StoreError>(())
            })
            .await;

        match result {
            Ok(()) => {
                tracing::debug!("Enqueued {} notification {}", kind, id);
                true
            }
            Err(e) => {
                tracing::error!("Failed to enqueue {} notification: {}", kind, e);
                false
            }
        }
    }

    /// Registers the handler for an envelope type, replacing any previous one.
    pub async fn register(&self, kind: &str, handler: EnvelopeHandler) {
        self.handlers.write().await.insert(kind.to_string(), handler);
    }

    /// Processes unprocessed envelopes in append order.
    ///
    /// Each envelope goes to the handler registered for its type, or to `fallback` when
    /// none is registered. Envelopes with no handler at all stay unprocessed for another
    /// consumer. After handlers ran, successful envelopes are stamped and the log is
    /// compacted.
    ///
    /// # Arguments
    /// - `fallback` - Handler for types without a registered handler
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of envelopes processed in this pass
    /// - `Err(StoreError)` - The log could not be read or rewritten
    pub async fn drain(&self, fallback: Option<&EnvelopeHandler>) -> Result<usize, StoreError> {
        let log: Vec<Envelope> = self.store.load(Collection::Notifications).await?;

        let now = Utc::now();
        let needs_compaction = log.iter().any(|envelope| is_stale(envelope, now));
        let pending: Vec<Envelope> = log.into_iter().filter(|e| !e.processed).collect();

        if pending.is_empty() && !needs_compaction {
            return Ok(0);
        }

        let handlers = self.handlers.read().await.clone();
        let mut stamped: HashMap<String, DateTime<Utc>> = HashMap::new();

        for envelope in pending {
            let Some(handler) = handlers.get(&envelope.kind).or(fallback) else {
                continue;
            };

            let id = envelope.id.clone();
            let kind = envelope.kind.clone();

            match handler(envelope).await {
                Ok(()) => {
                    stamped.insert(id, Utc::now());
                }
                Err(e) => {
                    tracing::warn!("Handler for {} notification {} failed: {}", kind, id, e);
                }
            }
        }

        if stamped.is_empty() && !needs_compaction {
            return Ok(0);
        }

        let processed = stamped.len();

        self.store
            .update(Collection::Notifications, |log: &mut Vec<Envelope>| {
                for envelope in log.iter_mut() {
                    if let Some(at) = stamped.get(&envelope.id) {
                        envelope.processed = true;
                        envelope.processed_at = Some(*at);
                    }
                }

                let now = Utc::now();
                log.retain(|envelope| {
                    let stale = is_stale(envelope, now);
                    if stale && !envelope.processed {
                        tracing::warn!(
                            "Dropping {} notification {} that nobody consumed since {}",
                            envelope.kind,
                            envelope.id,
                            envelope.created_at
                        );
                    }
                    !stale
                });

                Ok::<_, StoreError>(())
            })
            .await?;

        Ok(processed)
    }
}

fn is_stale(envelope: &Envelope, now: DateTime<Utc>) -> bool {
    if envelope.processed {
        let processed_at = envelope.processed_at.unwrap_or(envelope.created_at);
        now.signed_duration_since(processed_at) > PROCESSED_RETENTION
    } else {
        now.signed_duration_since(envelope.created_at) > UNPROCESSED_RETENTION
    }
}

