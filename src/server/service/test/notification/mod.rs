use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};

use crate::server::{
    data::store::{Collection, JsonStore},
    error::{store::StoreError, AppError},
    model::notification::{kind, Envelope},
    service::notification::{handler, NotificationQueue},
};
use test_utils::{builder::TestBuilder, collection, factory::envelope::EnvelopeFactory};

mod enqueue;
