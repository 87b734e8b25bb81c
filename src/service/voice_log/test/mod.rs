use super::*;
use crate::model::voice::{LogTarget, VoiceChannelRef};
use chrono::{Duration, TimeZone};
use serenity::async_trait;

mod plan;

const GUILD_ID: u64 = 123456789012345678;
const USER_ID: u64 = 42;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn general() -> VoiceChannelRef {
    VoiceChannelRef::new(10, "General")
}

fn gaming() -> VoiceChannelRef {
    VoiceChannelRef::new(20, "Gaming")
}

fn change(before: Option<VoiceChannelRef>, after: Option<VoiceChannelRef>) -> VoiceStateChange {
    VoiceStateChange {
        guild_id: GUILD_ID,
        user_id: USER_ID,
        is_bot: false,
        mention: format!("<@{USER_ID}>"),
        display_name: "Alice".to_string(),
        before,
        after,
    }
}

fn key() -> MemberKey {
    MemberKey::new(GUILD_ID, USER_ID)
}

/// Sink that records every delivered line, optionally pausing before each one.
#[derive(Default)]
struct RecordingSink {
    delay: Option<std::time::Duration>,
    resolved: Mutex<Vec<LogTarget>>,
    sent: Mutex<Vec<(LogTarget, String)>>,
}

impl RecordingSink {
    fn with_delay(delay: std::time::Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn lines(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn targets(&self) -> Vec<LogTarget> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }

    fn resolve_count(&self) -> usize {
        self.resolved.lock().unwrap().len()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    type Channel = LogTarget;

    async fn resolve(&self, target: &LogTarget) -> Result<LogTarget, AppError> {
        self.resolved.lock().unwrap().push(target.clone());
        Ok(target.clone())
    }

    async fn post(&self, channel: &LogTarget, content: &str) -> Result<(), AppError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel.clone(), content.to_string()));
        Ok(())
    }
}

/// Sink whose channel lookup fails, or that accepts a fixed number of lines and then fails.
struct FailingSink {
    fail_resolve: bool,
    accept: usize,
    sent: Mutex<Vec<String>>,
}

impl FailingSink {
    fn unresolvable() -> Self {
        Self {
            fail_resolve: true,
            accept: 0,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn after(accept: usize) -> Self {
        Self {
            fail_resolve: false,
            accept,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LogSink for FailingSink {
    type Channel = ();

    async fn resolve(&self, _target: &LogTarget) -> Result<(), AppError> {
        if self.fail_resolve {
            return Err(serenity::Error::Other("log channel unavailable").into());
        }
        Ok(())
    }

    async fn post(&self, _channel: &(), content: &str) -> Result<(), AppError> {
        let mut sent = self.sent.lock().unwrap();
        if sent.len() >= self.accept {
            return Err(serenity::Error::Other("message rejected").into());
        }
        sent.push(content.to_string());
        Ok(())
    }
}
