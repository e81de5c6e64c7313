#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use std::sync::Mutex;
use userkv_core::{KeyValueStore, PutItemInput, RequestContext, StoreError, StoreResult};

/// Clock value used across save scenarios: 2023-02-15T23:35:05 local time.
pub fn scenario_now() -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(2023, 2, 15, 23, 35, 5)
        .unwrap()
        .with_timezone(&Utc)
}

/// Store double that records every call and answers with a fixed outcome.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<(RequestContext, PutItemInput)>>,
    fail_with: Option<String>,
}

impl RecordingStore {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::default(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(RequestContext, PutItemInput)> {
        self.calls.lock().unwrap().clone()
    }
}

impl KeyValueStore for RecordingStore {
    fn put_item(&self, ctx: &RequestContext, input: PutItemInput) -> StoreResult<()> {
        self.calls.lock().unwrap().push((ctx.clone(), input));
        match &self.fail_with {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}
