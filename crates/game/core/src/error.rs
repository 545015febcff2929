//! Common error infrastructure for game-core.
//!
//! Expected gameplay refusals (not enough mana, ability still cooling down)
//! are values the caller branches on, reported through [`CastError`]. Hero
//! resource operations that can only succeed or not return `bool` instead.

use ecs::Entity;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: may succeed later without changing the request
/// - **Validation**: the request itself is wrong and should not be retried as-is
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: ability on cooldown, not enough mana.
    Recoverable,

    /// Examples: unknown ability slot, missing cast direction.
    Validation,

    /// Examples: caster lost its hero fragment mid-cast.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Why a cast was refused.
///
/// Every variant is produced before mana is deducted or the cooldown is
/// started, so a refused cast leaves the caster untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("caster {caster} does not exist or has no hero")]
    UnknownCaster { caster: Entity },

    #[error("caster {caster} has no ability in slot {slot}")]
    AbilityNotFound { caster: Entity, slot: usize },

    #[error("ability `{ability}` is on cooldown for {remaining:.2}s")]
    OnCooldown { ability: String, remaining: f32 },

    #[error("ability `{ability}` costs {required} mana, caster has {available}")]
    InsufficientMana {
        ability: String,
        required: f32,
        available: f32,
    },

    #[error("target {target} is not active")]
    InactiveTarget { target: Entity },

    #[error("target {target} has no hero")]
    TargetNotHero { target: Entity },

    #[error("ability `{ability}` needs a target entity")]
    MissingTarget { ability: String },

    #[error("caster {caster} has no position for ability `{ability}`")]
    MissingPosition { caster: Entity, ability: String },

    #[error("ability `{ability}` needs a non-zero direction")]
    InvalidDirection { ability: String },
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } | Self::InsufficientMana { .. } => ErrorSeverity::Recoverable,
            Self::InactiveTarget { .. } => ErrorSeverity::Recoverable,
            Self::UnknownCaster { .. }
            | Self::AbilityNotFound { .. }
            | Self::TargetNotHero { .. }
            | Self::MissingTarget { .. }
            | Self::InvalidDirection { .. } => ErrorSeverity::Validation,
            Self::MissingPosition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCaster { .. } => "UNKNOWN_CASTER",
            Self::AbilityNotFound { .. } => "ABILITY_NOT_FOUND",
            Self::OnCooldown { .. } => "ON_COOLDOWN",
            Self::InsufficientMana { .. } => "INSUFFICIENT_MANA",
            Self::InactiveTarget { .. } => "INACTIVE_TARGET",
            Self::TargetNotHero { .. } => "TARGET_NOT_HERO",
            Self::MissingTarget { .. } => "MISSING_TARGET",
            Self::MissingPosition { .. } => "MISSING_POSITION",
            Self::InvalidDirection { .. } => "INVALID_DIRECTION",
        }
    }
}

/// Why a hero could not be spawned or taught an ability.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpawnError {
    #[error(transparent)]
    Ecs(#[from] ecs::EcsError),

    #[error("no ability type registered as `{type_name}`")]
    UnknownAbilityType { type_name: String },

    #[error("entity {entity} has no hero")]
    NotAHero { entity: Entity },
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ecs(_) => ErrorSeverity::Internal,
            Self::UnknownAbilityType { .. } | Self::NotAHero { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Ecs(inner) => inner.error_code(),
            Self::UnknownAbilityType { .. } => "UNKNOWN_ABILITY_TYPE",
            Self::NotAHero { .. } => "NOT_A_HERO",
        }
    }
}
