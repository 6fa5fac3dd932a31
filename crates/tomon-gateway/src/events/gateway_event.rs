//! Typed events delivered to the client owner

use tomon_core::{Channel, Guild, Member, Message};

/// Why the gateway stopped for good
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// `close()` was called
    Requested,
    /// The supervisor gave up after this many consecutive failed attempts
    RetriesExhausted { attempts: u32 },
}

/// An event published after the cache has been updated
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// Identity acknowledged and the cache rebuilt
    Ready {
        guild_count: usize,
        channel_count: usize,
    },

    GuildCreate(Guild),
    GuildUpdate(Guild),
    GuildDelete(Guild),

    ChannelCreate(Channel),
    ChannelUpdate(Channel),
    ChannelDelete(Channel),

    GuildMemberAdd(Member),
    GuildMemberUpdate(Member),
    GuildMemberRemove(Member),

    MessageCreate(Message),
    MessageUpdate(Message),
    MessageDelete(Message),

    /// The client will not reconnect on its own
    Closed(CloseReason),
}

impl GatewayEvent {
    /// Short name used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ready { .. } => "READY",
            Self::GuildCreate(_) => "GUILD_CREATE",
            Self::GuildUpdate(_) => "GUILD_UPDATE",
            Self::GuildDelete(_) => "GUILD_DELETE",
            Self::ChannelCreate(_) => "CHANNEL_CREATE",
            Self::ChannelUpdate(_) => "CHANNEL_UPDATE",
            Self::ChannelDelete(_) => "CHANNEL_DELETE",
            Self::GuildMemberAdd(_) => "GUILD_MEMBER_ADD",
            Self::GuildMemberUpdate(_) => "GUILD_MEMBER_UPDATE",
            Self::GuildMemberRemove(_) => "GUILD_MEMBER_REMOVE",
            Self::MessageCreate(_) => "MESSAGE_CREATE",
            Self::MessageUpdate(_) => "MESSAGE_UPDATE",
            Self::MessageDelete(_) => "MESSAGE_DELETE",
            Self::Closed(_) => "CLOSED",
        }
    }
}
