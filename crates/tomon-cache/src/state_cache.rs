//! State cache
//!
//! Guilds, channels, per-guild members, and the guild → channel index, all
//! behind one `RwLock` so a reset is never observed half applied.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tomon_core::{Channel, Guild, GuildSnapshot, Member, Snowflake, User};

/// Shared handle used by the gateway (writer) and the facade (reader)
pub type SharedStateCache = Arc<StateCache>;

#[derive(Debug, Default)]
struct CacheState {
    guilds: HashMap<Snowflake, Guild>,
    channels: HashMap<Snowflake, Channel>,
    /// guild id -> (user id -> member)
    members: HashMap<Snowflake, HashMap<Snowflake, Member>>,
    /// guild id -> channel ids
    channels_in_guild: HashMap<Snowflake, HashSet<Snowflake>>,
}

/// Entry counts, for logs and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub guilds: usize,
    pub channels: usize,
    pub member_guilds: usize,
    pub members: usize,
}

/// In-memory snapshot of the account's guilds, channels, and members
pub struct StateCache {
    inner: RwLock<CacheState>,
}

impl StateCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheState::default()),
        }
    }

    /// Create an empty cache wrapped in Arc
    #[must_use]
    pub fn new_shared() -> SharedStateCache {
        Arc::new(Self::new())
    }

    // === Whole-state operations ===

    /// Discard everything
    pub fn reset(&self) {
        *self.inner.write() = CacheState::default();
        tracing::debug!("State cache reset");
    }

    /// Replace the whole state with an identity acknowledgement's snapshot
    ///
    /// DM channels are stored without an index entry. Guild channels and
    /// members lacking a guild id inherit the id of the guild they came with.
    pub fn rebuild(&self, dm_channels: Vec<Channel>, guilds: Vec<GuildSnapshot>) {
        let mut state = CacheState::default();

        for channel in dm_channels {
            state.channels.insert(channel.id, channel);
        }

        for snapshot in guilds {
            let guild_id = snapshot.guild.id;

            let index = state.channels_in_guild.entry(guild_id).or_default();
            for mut channel in snapshot.channels {
                channel.guild_id.get_or_insert(guild_id);
                index.insert(channel.id);
                state.channels.insert(channel.id, channel);
            }

            let members = state.members.entry(guild_id).or_default();
            for mut member in snapshot.members {
                member.guild_id.get_or_insert(guild_id);
                members.insert(member.user_id(), member);
            }

            state.guilds.insert(guild_id, snapshot.guild);
        }

        let stats = Self::count(&state);
        *self.inner.write() = state;

        tracing::debug!(
            guilds = stats.guilds,
            channels = stats.channels,
            members = stats.members,
            "State cache rebuilt"
        );
    }

    // === Guilds ===

    /// Insert or replace a guild
    pub fn upsert_guild(&self, guild: Guild) {
        tracing::trace!(guild_id = %guild.id, "Guild cached");
        self.inner.write().guilds.insert(guild.id, guild);
    }

    /// Remove a guild and its channel index entry
    pub fn remove_guild(&self, guild_id: Snowflake) -> Option<Guild> {
        let mut state = self.inner.write();
        state.channels_in_guild.remove(&guild_id);
        let removed = state.guilds.remove(&guild_id);

        tracing::trace!(guild_id = %guild_id, found = removed.is_some(), "Guild removed");
        removed
    }

    pub fn guild(&self, guild_id: Snowflake) -> Option<Guild> {
        self.inner.read().guilds.get(&guild_id).cloned()
    }

    pub fn guilds(&self) -> Vec<Guild> {
        self.inner.read().guilds.values().cloned().collect()
    }

    // === Channels ===

    /// Insert or replace a channel, indexing it under its guild
    pub fn insert_channel(&self, channel: Channel) {
        let mut state = self.inner.write();
        if let Some(guild_id) = channel.guild_id {
            state
                .channels_in_guild
                .entry(guild_id)
                .or_default()
                .insert(channel.id);
        }

        tracing::trace!(channel_id = %channel.id, "Channel cached");
        state.channels.insert(channel.id, channel);
    }

    /// Replace a channel without touching the index
    pub fn update_channel(&self, channel: Channel) {
        tracing::trace!(channel_id = %channel.id, "Channel updated");
        self.inner.write().channels.insert(channel.id, channel);
    }

    /// Remove a channel and drop it from its guild's index bucket
    ///
    /// The guild is taken from `guild_hint` (the delete payload) or else from
    /// the cached copy.
    pub fn remove_channel(&self, channel_id: Snowflake, guild_hint: Option<Snowflake>) -> Option<Channel> {
        let mut state = self.inner.write();
        let removed = state.channels.remove(&channel_id);

        let guild_id = guild_hint.or_else(|| removed.as_ref().and_then(|c| c.guild_id));
        if let Some(bucket) = guild_id.and_then(|g| state.channels_in_guild.get_mut(&g)) {
            bucket.remove(&channel_id);
        }

        tracing::trace!(channel_id = %channel_id, found = removed.is_some(), "Channel removed");
        removed
    }

    pub fn channel(&self, channel_id: Snowflake) -> Option<Channel> {
        self.inner.read().channels.get(&channel_id).cloned()
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.inner.read().channels.values().cloned().collect()
    }

    /// Channel ids indexed under a guild; `None` when the guild has no bucket
    pub fn channels_in_guild(&self, guild_id: Snowflake) -> Option<HashSet<Snowflake>> {
        self.inner.read().channels_in_guild.get(&guild_id).cloned()
    }

    // === Members ===

    /// Insert or replace a member of `guild_id`
    pub fn upsert_member(&self, guild_id: Snowflake, member: Member) {
        tracing::trace!(guild_id = %guild_id, user_id = %member.user_id(), "Member cached");
        self.inner
            .write()
            .members
            .entry(guild_id)
            .or_default()
            .insert(member.user_id(), member);
    }

    pub fn remove_member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<Member> {
        self.inner
            .write()
            .members
            .get_mut(&guild_id)
            .and_then(|members| members.remove(&user_id))
    }

    /// Snapshot of a guild's member mapping, creating the mapping when absent
    pub fn members(&self, guild_id: Snowflake) -> HashMap<Snowflake, Member> {
        if let Some(members) = self.inner.read().members.get(&guild_id) {
            return members.clone();
        }
        self.inner
            .write()
            .members
            .entry(guild_id)
            .or_default()
            .clone()
    }

    pub fn member(&self, guild_id: Snowflake, user_id: Snowflake) -> Option<Member> {
        self.inner
            .read()
            .members
            .get(&guild_id)
            .and_then(|members| members.get(&user_id))
            .cloned()
    }

    // === Users ===

    /// Find a user among channel recipients and every guild's members
    pub fn find_user(&self, user_id: Snowflake) -> Option<User> {
        let state = self.inner.read();

        let from_channels = state
            .channels
            .values()
            .find_map(|channel| channel.recipient(user_id));
        if let Some(user) = from_channels {
            return Some(user.clone());
        }

        state
            .members
            .values()
            .find_map(|members| members.get(&user_id))
            .map(|member| member.user.clone())
    }

    // === Diagnostics ===

    pub fn stats(&self) -> CacheStats {
        Self::count(&self.inner.read())
    }

    fn count(state: &CacheState) -> CacheStats {
        CacheStats {
            guilds: state.guilds.len(),
            channels: state.channels.len(),
            member_guilds: state.members.len(),
            members: state.members.values().map(HashMap::len).sum(),
        }
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("StateCache")
            .field("guilds", &stats.guilds)
            .field("channels", &stats.channels)
            .field("members", &stats.members)
            .finish()
    }
}
