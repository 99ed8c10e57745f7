/// Redis cache for provider-generated replies.
///
/// Only text produced by the remote provider is stored; fallback text is cheap to rebuild.
/// All operations degrade to no-ops when Redis is absent.
///
/// Key schema:
/// - `scheme:v1:reply:single:{sha256(language|title|link|query)}`: `/query` style reply
/// - `scheme:v1:reply:multi:{sha256(language|title|link|...|query)}`: `/answer` style reply
use sha2::{Digest, Sha256};

use scheme_common::redis::RedisCache;

use crate::error::AppError;
use crate::messages::Language;
use crate::model::SchemeRecord;

const KEY_PREFIX: &str = "scheme:v1:";

/// Which prompt produced a reply. Single and multi-scheme answers differ in length and
/// shape, so they never share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Single,
    Multi,
}

impl ReplyKind {
    fn tag(self) -> &'static str {
        match self {
            ReplyKind::Single => "single",
            ReplyKind::Multi => "multi",
        }
    }
}

pub struct ReplyCache {
    redis: RedisCache,
    ttl_secs: u64,
}

impl ReplyCache {
    pub fn new(redis: RedisCache, ttl_secs: u64) -> Self {
        Self { redis, ttl_secs }
    }

    pub fn disabled() -> Self {
        Self::new(RedisCache::disabled(), 0)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.redis.ping().await?;
        Ok(())
    }

    pub async fn get_reply(
        &self,
        language: Language,
        kind: ReplyKind,
        schemes: &[&SchemeRecord],
        query: &str,
    ) -> Option<String> {
        if !self.redis.is_configured() {
            return None;
        }
        self.redis
            .get(&reply_key(language, kind, schemes, query))
            .await
    }

    pub async fn set_reply(
        &self,
        language: Language,
        kind: ReplyKind,
        schemes: &[&SchemeRecord],
        query: &str,
        reply: &str,
    ) {
        if !self.redis.is_configured() || self.ttl_secs == 0 {
            return;
        }
        self.redis
            .set_with_ttl(&reply_key(language, kind, schemes, query), reply, self.ttl_secs)
            .await;
    }
}

fn reply_key(language: Language, kind: ReplyKind, schemes: &[&SchemeRecord], query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(language.code().as_bytes());
    for scheme in schemes {
        hasher.update(b"|");
        hasher.update(scheme.title.to_lowercase().as_bytes());
        hasher.update(b"|");
        hasher.update(scheme.link.as_bytes());
    }
    hasher.update(b"|");
    hasher.update(query.trim().to_lowercase().as_bytes());
    let hash = hasher.finalize();
    format!("{KEY_PREFIX}reply:{}:{:x}", kind.tag(), hash)
}
