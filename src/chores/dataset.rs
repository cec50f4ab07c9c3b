use super::{model::ChoreOrigin, Chore, ChoreError};

const BUILTIN_CHORES: &str = include_str!("../../data/chores.json");

/// Parses the chore list shipped with the app.
pub fn builtin_chores() -> Result<Vec<Chore>, ChoreError> {
    parse_builtin(BUILTIN_CHORES)
}

pub(crate) fn parse_builtin(raw: &str) -> Result<Vec<Chore>, ChoreError> {
    let mut chores: Vec<Chore> = serde_json::from_str(raw).map_err(ChoreError::Dataset)?;
    for chore in &mut chores {
        chore.origin = ChoreOrigin::Builtin;
    }
    Ok(chores)
}
