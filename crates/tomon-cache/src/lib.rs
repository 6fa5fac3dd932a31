//! # tomon-cache
//!
//! In-memory view of the account's guilds, channels, and guild members.
//!
//! The cache is rebuilt wholesale from every identity acknowledgement and
//! patched by dispatch events afterwards. Facade reads consult it before
//! falling back to REST.
//!
//! ## Example
//!
//! ```ignore
//! use tomon_cache::StateCache;
//!
//! let cache = StateCache::new_shared();
//! cache.rebuild(ack.dm_channels, ack.guilds);
//! cache.insert_channel(channel);
//!
//! let ids = cache.channels_in_guild(guild_id);
//! ```

mod state_cache;

pub use state_cache::{CacheStats, SharedStateCache, StateCache};
