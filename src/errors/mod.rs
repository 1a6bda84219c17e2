use thiserror::Error;

/// Outcomes surfaced to callers as distinct, user-actionable errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not authorized as referee")]
    Unauthorized,

    #[error("team does not play in this match")]
    InvalidTeamReference,

    #[error("match has fewer than two pairings")]
    TournamentPairingsIncomplete,

    #[error("all four positions must be provided")]
    PositionsIncomplete,

    #[error("positions must not be mixed between teams")]
    PositionsCrossTeam,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
